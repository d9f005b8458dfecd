//! Pure grid-world kernel (no environment-contract traits).
//! - Cell objects, grid storage and capability rules
//! - Stepping state machine with goal/lava rewards and step limits
//! - Seeded placement service and pluggable content generators
//! - Egocentric, rotation-normalised, occlusion-aware observations

#[macro_use]
mod contract;

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod grid;
pub mod object;
pub mod placement;
pub mod presets;
pub mod render;
pub mod task;
pub mod types;

pub use config::EnvConfig;
pub use engine::{AgentState, MiniGridEnv, Observation};
pub use error::MiniGridError;
pub use generator::{DoorKey, EmptyRoom, FixedLayout, GridGenerator};
pub use grid::Grid;
pub use object::WorldObj;
pub use placement::Scene;
pub use render::VisibilityMask;
pub use task::{make_task, TASK_IDS};
pub use types::{Action, Color, Direction, ObjectKind, PublicState};
