use thiserror::Error;

/// Recoverable kernel errors. Broken world invariants are not represented here;
/// those abort through the `contract!` checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MiniGridError {
    #[error("invalid action index {0} (expected 0..=6)")]
    InvalidAction(u8),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unknown task: {0}")]
    UnknownTask(String),
    #[error("no free cell found in x=[{start_x},{end_x}] y=[{start_y},{end_y}] after {attempts} attempts")]
    PlacementExhausted {
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        attempts: u32,
    },
}
