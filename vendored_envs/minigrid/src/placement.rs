//! Placement service: uniform rejection sampling of free cells, shared by
//! content generators and agent initialization.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::error::MiniGridError;
use crate::grid::Grid;
use crate::object::WorldObj;
use crate::types::Direction;

/// A world under construction during reset. Generators draw the layout into
/// `grid` and fix the agent start through [`Scene::place_agent`] or
/// [`Scene::set_agent`].
pub struct Scene<'a> {
    pub grid: Grid,
    agent_pos: Option<(i32, i32)>,
    agent_dir: Option<Direction>,
    rng: &'a mut ChaCha8Rng,
    start_dir: Option<Direction>,
    max_attempts: u32,
}

impl<'a> Scene<'a> {
    pub fn new(grid: Grid, rng: &'a mut ChaCha8Rng, start_dir: Option<Direction>, max_attempts: u32) -> Self {
        Self { grid, agent_pos: None, agent_dir: None, rng, start_dir, max_attempts }
    }

    pub fn width(&self) -> i32 { self.grid.width() }
    pub fn height(&self) -> i32 { self.grid.height() }
    pub fn agent_pos(&self) -> Option<(i32, i32)> { self.agent_pos }
    pub fn agent_dir(&self) -> Option<Direction> { self.agent_dir }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut *self.rng
    }

    /// Uniform integer in `[low, high]`.
    pub fn rand_int(&mut self, low: i32, high: i32) -> i32 {
        contract!(low <= high, "empty range [{low},{high}]");
        self.rng.gen_range(low..=high)
    }

    pub fn set_agent(&mut self, pos: (i32, i32), dir: Direction) {
        self.agent_pos = Some(pos);
        self.agent_dir = Some(dir);
    }

    /// Place the agent on a free cell of the inclusive rectangle. An end
    /// coordinate of -1 stands for the last row/column of the grid. The facing
    /// is the configured start direction or, absent one, a uniform draw.
    pub fn place_agent(&mut self, start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Result<(i32, i32), MiniGridError> {
        self.agent_pos = None;
        let pos = self.place_object(start_x, start_y, end_x, end_y)?;
        self.agent_pos = Some(pos);
        let dir = match self.start_dir {
            Some(d) => d,
            None => Direction::ALL[self.rng.gen_range(0..4usize)],
        };
        self.agent_dir = Some(dir);
        Ok(pos)
    }

    /// Find a cell in the inclusive rectangle that is Empty and not under the
    /// agent. Sampling gives up after the configured attempt budget.
    pub fn place_object(&mut self, start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Result<(i32, i32), MiniGridError> {
        let end_x = if end_x == -1 { self.grid.width() - 1 } else { end_x };
        let end_y = if end_y == -1 { self.grid.height() - 1 } else { end_y };
        contract!(
            start_x <= end_x && start_y <= end_y,
            "placement rectangle x=[{start_x},{end_x}] y=[{start_y},{end_y}] is inverted"
        );
        contract!(
            self.grid.in_bounds(start_x, start_y) && self.grid.in_bounds(end_x, end_y),
            "placement rectangle x=[{start_x},{end_x}] y=[{start_y},{end_y}] leaves the grid"
        );
        for _ in 0..self.max_attempts {
            let x = self.rng.gen_range(start_x..=end_x);
            let y = self.rng.gen_range(start_y..=end_y);
            if !self.grid.get(x, y).is_empty() {
                continue;
            }
            if self.agent_pos == Some((x, y)) {
                continue;
            }
            return Ok((x, y));
        }
        tracing::warn!(start_x, start_y, end_x, end_y, attempts = self.max_attempts, "placement exhausted");
        Err(MiniGridError::PlacementExhausted { start_x, start_y, end_x, end_y, attempts: self.max_attempts })
    }

    /// Sample a free cell and store `obj` there.
    pub fn put_object(&mut self, obj: WorldObj, start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Result<(i32, i32), MiniGridError> {
        let (x, y) = self.place_object(start_x, start_y, end_x, end_y)?;
        self.grid.set(x, y, obj);
        Ok((x, y))
    }

    pub(crate) fn into_parts(self) -> (Grid, Option<(i32, i32)>, Option<Direction>) {
        (self.grid, self.agent_pos, self.agent_dir)
    }
}
