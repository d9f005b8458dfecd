use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::EnvConfig;
use crate::error::MiniGridError;
use crate::generator::GridGenerator;
use crate::grid::Grid;
use crate::object::WorldObj;
use crate::placement::Scene;
use crate::render::{self, ViewGrid, ViewRequest, VisibilityMask};
use crate::types::{Action, Color, Direction, ObjectKind, PublicState};

#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub pos: (i32, i32),
    pub dir: Direction,
    pub carrying: WorldObj,
    pub step_count: u32,
    pub done: bool,
}

impl Default for AgentState {
    fn default() -> Self {
        Self { pos: (0, 0), dir: Direction::Right, carrying: WorldObj::empty(), step_count: 0, done: false }
    }
}

/// Egocentric observation produced by [`MiniGridEnv::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub view_size: usize,
    /// `[x][y][channel]`, flattened.
    pub image: Vec<u8>,
    pub visibility: VisibilityMask,
}

impl Observation {
    pub fn cell(&self, x: usize, y: usize) -> [u8; 3] {
        let base = (x * self.view_size + y) * 3;
        [self.image[base], self.image[base + 1], self.image[base + 2]]
    }

    /// Nested `[x][y][3]` form of the image.
    pub fn to_nested(&self) -> Vec<Vec<[u8; 3]>> {
        (0..self.view_size).map(|x| (0..self.view_size).map(|y| self.cell(x, y)).collect()).collect()
    }
}

pub struct MiniGridEnv {
    config: EnvConfig,
    generator: Box<dyn GridGenerator>,
    grid: Grid,
    agent: AgentState,
    rng: ChaCha8Rng,
    reward_last: f32,
    total_reward: f32,
}

impl std::fmt::Debug for MiniGridEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniGridEnv")
            .field("mission", &self.generator.mission())
            .field("config", &self.config)
            .field("agent", &self.agent)
            .finish_non_exhaustive()
    }
}

impl MiniGridEnv {
    /// Build an instance and run the first reset.
    pub fn new(config: EnvConfig, generator: Box<dyn GridGenerator>) -> Result<Self, MiniGridError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let grid = Grid::new(config.width, config.height);
        let mut env = Self {
            config,
            generator,
            grid,
            agent: AgentState::default(),
            rng,
            reward_last: 0.0,
            total_reward: 0.0,
        };
        env.reset()?;
        Ok(env)
    }

    /// Regenerate the world and restart the episode. Generator failures are
    /// returned; a generated world that breaks the start invariants is fatal.
    pub fn reset(&mut self) -> Result<(), MiniGridError> {
        let fresh = Grid::new(self.config.width, self.config.height);
        let mut scene = Scene::new(fresh, &mut self.rng, self.config.agent_start_dir, self.config.max_placement_attempts);
        self.generator.generate(&mut scene)?;
        let (grid, pos, dir) = scene.into_parts();

        let (Some(pos), Some(dir)) = (pos, dir) else {
            crate::contract::violated(
                format!("generator `{}` did not place the agent", self.generator.mission()),
                "agent start set",
            );
        };
        contract!(grid.in_bounds(pos.0, pos.1), "agent start {pos:?} outside {}x{} grid", grid.width(), grid.height());
        contract!(grid.get(pos.0, pos.1).can_overlap(), "agent start {pos:?} is on a solid {:?}", grid.get(pos.0, pos.1).kind());

        self.grid = grid;
        self.agent = AgentState { pos, dir, carrying: WorldObj::empty(), step_count: 0, done: false };
        self.reward_last = 0.0;
        self.total_reward = 0.0;
        tracing::debug!(mission = self.generator.mission(), ?pos, ?dir, "episode reset");
        Ok(())
    }

    fn forward_pos(&self) -> (i32, i32) {
        let (dx, dy) = self.agent.dir.delta();
        let fwd = (self.agent.pos.0 + dx, self.agent.pos.1 + dy);
        contract!(
            self.grid.in_bounds(fwd.0, fwd.1),
            "forward cell {fwd:?} outside {}x{} grid; the layout needs a closed border",
            self.grid.width(),
            self.grid.height()
        );
        fwd
    }

    /// Advance one step and return its reward. Once the episode is done,
    /// further steps change nothing and yield 0.0 until [`Self::reset`].
    pub fn step(&mut self, action: Action) -> f32 {
        if self.agent.done {
            tracing::trace!(?action, "step after episode end ignored");
            self.reward_last = 0.0;
            return 0.0;
        }
        self.agent.step_count += 1;
        let mut reward = 0.0;
        let (fx, fy) = self.forward_pos();

        match action {
            Action::Left => {
                self.agent.dir = self.agent.dir.left();
            }
            Action::Right => {
                self.agent.dir = self.agent.dir.right();
            }
            Action::Forward => {
                if self.grid.get(fx, fy).can_overlap() {
                    self.agent.pos = (fx, fy);
                }
                match self.grid.get(fx, fy).kind() {
                    ObjectKind::Goal => {
                        self.agent.done = true;
                        reward = self.goal_reward();
                    }
                    ObjectKind::Lava => {
                        self.agent.done = true;
                    }
                    _ => {}
                }
            }
            Action::Pickup => {
                if self.agent.carrying.is_empty() && self.grid.get(fx, fy).can_pickup() {
                    self.agent.carrying = self.grid.take(fx, fy);
                }
            }
            Action::Drop => {
                if !self.agent.carrying.is_empty() && self.grid.get(fx, fy).is_empty() {
                    let obj = std::mem::take(&mut self.agent.carrying);
                    self.grid.set(fx, fy, obj);
                }
            }
            Action::Toggle => match self.grid.get(fx, fy).kind() {
                ObjectKind::Door => {
                    self.grid.get_mut(fx, fy).toggle_door(&self.agent.carrying);
                }
                ObjectKind::Box => {
                    let boxed = self.grid.take(fx, fy);
                    self.grid.set(fx, fy, boxed.open_box());
                }
                _ => {}
            },
            Action::Done => {}
        }

        if self.agent.step_count >= self.config.max_steps {
            self.agent.done = true;
        }
        self.reward_last = reward;
        self.total_reward += reward;
        tracing::trace!(?action, step = self.agent.step_count, pos = ?self.agent.pos, reward, "step");
        if self.agent.done {
            tracing::debug!(steps = self.agent.step_count, total_reward = self.total_reward, "episode done");
        }
        reward
    }

    /// Step with a raw action code. Codes outside `0..=6` are a caller bug.
    pub fn step_index(&mut self, code: u8) -> f32 {
        let Ok(action) = Action::try_from(code) else {
            crate::contract::violated(format!("unrecognised action code {code}"), "code <= 6");
        };
        self.step(action)
    }

    /// `1 - 0.9 * (step_count / max_steps)`
    fn goal_reward(&self) -> f32 {
        1.0 - 0.9 * (self.agent.step_count as f32 / self.config.max_steps as f32)
    }

    fn view_request(&self) -> ViewRequest<'_> {
        ViewRequest {
            grid: &self.grid,
            agent_pos: self.agent.pos,
            agent_dir: self.agent.dir,
            carrying: &self.agent.carrying,
            view_size: self.config.agent_view_size,
            see_through_walls: self.config.see_through_walls,
        }
    }

    /// Write the egocentric observation into a caller-owned, pre-zeroed
    /// `[view][view][3]` buffer indexed `[x][y][channel]`.
    pub fn render_into(&self, out: &mut [u8]) -> VisibilityMask {
        render::render_into(&self.view_request(), out)
    }

    pub fn render(&self) -> Observation {
        let n = self.config.agent_view_size as usize;
        let mut image = vec![0u8; n * n * 3];
        let visibility = self.render_into(&mut image);
        Observation { view_size: n, image, visibility }
    }

    /// Rotated, occlusion-filtered view as objects, `[row][col]`.
    pub fn agent_view(&self) -> (ViewGrid, VisibilityMask) {
        render::agent_view(&self.view_request())
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn config(&self) -> &EnvConfig { &self.config }
    pub fn agent(&self) -> &AgentState { &self.agent }
    pub fn agent_pos(&self) -> (i32, i32) { self.agent.pos }
    pub fn agent_dir(&self) -> Direction { self.agent.dir }
    pub fn carrying(&self) -> &WorldObj { &self.agent.carrying }
    pub fn step_count(&self) -> u32 { self.agent.step_count }
    pub fn max_steps(&self) -> u32 { self.config.max_steps }
    pub fn done(&self) -> bool { self.agent.done }
    pub fn truncated(&self) -> bool { self.agent.step_count >= self.config.max_steps }
    pub fn mission(&self) -> &str { self.generator.mission() }
    pub fn reward_last(&self) -> f32 { self.reward_last }
    pub fn total_reward(&self) -> f32 { self.total_reward }
    pub fn width(&self) -> i32 { self.grid.width() }
    pub fn height(&self) -> i32 { self.grid.height() }

    /// Full-grid snapshot with the agent drawn in its cell.
    pub fn public_state(&self) -> PublicState {
        let mut grid = self.grid.encode();
        let (ax, ay) = self.agent.pos;
        let under = self.grid.get(ax, ay);
        // Keep lava/goal visible under the agent; the state channel carries the facing.
        let kind = if under.is_empty() { ObjectKind::Agent } else { under.kind() };
        let color = if under.is_empty() { Color::Red } else { under.color() };
        grid[ay as usize][ax as usize] = [kind as u8, color as u8, self.agent.dir.index()];

        let carrying = if self.agent.carrying.is_empty() {
            None
        } else {
            Some((self.agent.carrying.kind(), self.agent.carrying.color()))
        };
        PublicState {
            grid_array: grid,
            agent_pos: self.agent.pos,
            agent_dir: self.agent.dir.index(),
            step_count: self.agent.step_count,
            max_steps: self.config.max_steps,
            mission: self.mission().to_string(),
            terminated: self.agent.done,
            carrying,
        }
    }
}
