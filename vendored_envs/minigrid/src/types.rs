use serde::{Deserialize, Serialize};

use crate::error::MiniGridError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Action {
    Left = 0,
    Right = 1,
    Forward = 2,
    Pickup = 3,
    Drop = 4,
    Toggle = 5,
    Done = 6,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Left,
        Action::Right,
        Action::Forward,
        Action::Pickup,
        Action::Drop,
        Action::Toggle,
        Action::Done,
    ];

    /// Parse a lower- or mixed-case action name ("left", "Forward", ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "left" => Action::Left,
            "right" => Action::Right,
            "forward" => Action::Forward,
            "pickup" => Action::Pickup,
            "drop" => Action::Drop,
            "toggle" => Action::Toggle,
            "done" => Action::Done,
            _ => return None,
        })
    }
}

impl TryFrom<u8> for Action {
    type Error = MiniGridError;
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Action::ALL
            .get(v as usize)
            .copied()
            .ok_or(MiniGridError::InvalidAction(v))
    }
}

/// Facing direction. Indices follow the screen convention where y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

    pub fn from_index(v: u8) -> Option<Self> {
        Direction::ALL.get(v as usize).copied()
    }
    pub fn index(self) -> u8 {
        self as u8
    }
    pub fn right(self) -> Self {
        match self {
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
        }
    }
    pub fn left(self) -> Self {
        match self {
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
        }
    }
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }
}

/// Channel-0 object codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObjectKind {
    Unseen = 0,
    Empty = 1,
    Wall = 2,
    Floor = 3,
    Door = 4,
    Key = 5,
    Ball = 6,
    Box = 7,
    Goal = 8,
    Lava = 9,
    Agent = 10,
}

/// Channel-1 color codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    #[default]
    Red = 0,
    Green = 1,
    Blue = 2,
    Purple = 3,
    Yellow = 4,
    Grey = 5,
}

/// Channel-2 door state codes. Non-door objects always encode 0.
pub mod door_state {
    pub const OPEN: u8 = 0;
    pub const CLOSED: u8 = 1;
    pub const LOCKED: u8 = 2;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicState {
    pub grid_array: Vec<Vec<[u8; 3]>>, // [h][w][3] (object,color,state)
    pub agent_pos: (i32, i32),         // (x,y)
    pub agent_dir: u8,                 // 0..3
    pub step_count: u32,
    pub max_steps: u32,
    pub mission: String,
    pub terminated: bool,
    pub carrying: Option<(ObjectKind, Color)>,
}
