//! Content generators. The engine asks one of these to lay out a fresh grid
//! and pick the agent start on every reset.

use crate::error::MiniGridError;
use crate::grid::Grid;
use crate::object::WorldObj;
use crate::placement::Scene;
use crate::types::{Color, Direction};

pub trait GridGenerator: Send + Sync {
    fn mission(&self) -> &str;
    fn generate(&self, scene: &mut Scene<'_>) -> Result<(), MiniGridError>;
}

/// Walled room with the goal in the bottom-right corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyRoom {
    /// `None` places the agent anywhere with a random facing.
    pub agent_start: Option<((i32, i32), Direction)>,
}

impl Default for EmptyRoom {
    fn default() -> Self {
        Self { agent_start: Some(((1, 1), Direction::Right)) }
    }
}

impl EmptyRoom {
    pub fn random_start() -> Self {
        Self { agent_start: None }
    }
}

impl GridGenerator for EmptyRoom {
    fn mission(&self) -> &str { "get to the green goal square" }

    fn generate(&self, scene: &mut Scene<'_>) -> Result<(), MiniGridError> {
        let (w, h) = (scene.width(), scene.height());
        scene.grid.wall_rect(0, 0, w, h);
        scene.grid.set(w - 2, h - 2, WorldObj::goal());
        match self.agent_start {
            Some((pos, dir)) => scene.set_agent(pos, dir),
            None => {
                scene.place_agent(1, 1, w - 2, h - 2)?;
            }
        }
        Ok(())
    }
}

/// Two rooms split by a vertical wall with a locked yellow door; the matching
/// key and the agent start on the left, the goal sits bottom-right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoorKey;

impl GridGenerator for DoorKey {
    fn mission(&self) -> &str { "use the key to open the door and then get to the goal" }

    fn generate(&self, scene: &mut Scene<'_>) -> Result<(), MiniGridError> {
        let (w, h) = (scene.width(), scene.height());
        contract!(w >= 5 && h >= 4, "door-key layout needs at least 5x4, got {w}x{h}");
        scene.grid.wall_rect(0, 0, w, h);
        scene.grid.set(w - 2, h - 2, WorldObj::goal());

        let split = scene.rand_int(2, w - 3);
        scene.grid.vert_wall(split, 0, h);
        scene.place_agent(0, 0, split - 1, h - 1)?;

        let door_row = scene.rand_int(1, h - 3);
        scene.grid.set(split, door_row, WorldObj::door(Color::Yellow, false, true));
        scene.put_object(WorldObj::key(Color::Yellow), 0, 0, split - 1, h - 1)?;
        Ok(())
    }
}

/// Prebuilt grid with a fixed start; every reset restores the same world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLayout {
    pub grid: Grid,
    pub agent_pos: (i32, i32),
    pub agent_dir: Direction,
    pub mission: String,
}

impl FixedLayout {
    pub fn new(grid: Grid, agent_pos: (i32, i32), agent_dir: Direction, mission: impl Into<String>) -> Self {
        Self { grid, agent_pos, agent_dir, mission: mission.into() }
    }
}

impl GridGenerator for FixedLayout {
    fn mission(&self) -> &str { &self.mission }

    fn generate(&self, scene: &mut Scene<'_>) -> Result<(), MiniGridError> {
        contract!(
            self.grid.width() == scene.width() && self.grid.height() == scene.height(),
            "layout is {}x{} but the episode grid is {}x{}",
            self.grid.width(),
            self.grid.height(),
            scene.width(),
            scene.height()
        );
        scene.grid = self.grid.clone();
        scene.set_agent(self.agent_pos, self.agent_dir);
        Ok(())
    }
}
