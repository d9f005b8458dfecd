use serde::{Deserialize, Serialize};

use crate::error::MiniGridError;
use crate::types::Direction;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub width: i32,
    pub height: i32,
    pub max_steps: u32,
    /// Edge length of the egocentric view; must be odd.
    pub agent_view_size: i32,
    /// Skip occlusion entirely and treat every viewport cell as visible.
    pub see_through_walls: bool,
    /// Fixed start facing applied by `place_agent`; `None` draws one uniformly.
    pub agent_start_dir: Option<Direction>,
    pub seed: Option<u64>,
    pub max_placement_attempts: u32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            max_steps: 100,
            agent_view_size: 7,
            see_through_walls: false,
            agent_start_dir: None,
            seed: None,
            max_placement_attempts: 10_000,
        }
    }
}

impl EnvConfig {
    pub fn square(size: i32, max_steps: u32) -> Self {
        Self { width: size, height: size, max_steps, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), MiniGridError> {
        if self.width < 3 || self.height < 3 {
            return Err(MiniGridError::InvalidConfig(format!(
                "grid must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_steps == 0 {
            return Err(MiniGridError::InvalidConfig("max_steps must be at least 1".into()));
        }
        if self.agent_view_size < 3 || self.agent_view_size % 2 == 0 {
            return Err(MiniGridError::InvalidConfig(format!(
                "agent_view_size must be odd and >= 3, got {}",
                self.agent_view_size
            )));
        }
        if self.max_placement_attempts == 0 {
            return Err(MiniGridError::InvalidConfig("max_placement_attempts must be at least 1".into()));
        }
        Ok(())
    }
}
