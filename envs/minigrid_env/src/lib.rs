use async_trait::async_trait;
use env_core::{register_environment_with_config, EngineError, Environment, Observation, Snapshot, ToolCall};
use minigrid_rs::{Action, MiniGridEnv, MiniGridError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as Json};
use std::sync::Arc;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Task id (`MiniGrid-DoorKey-8x8-v0`) or preset name (`doorkey_inline`).
    pub env_name: Option<String>,
    pub max_steps: Option<u32>,
    pub seed: Option<u64>,
    pub agent_view_size: Option<i32>,
    pub see_through_walls: Option<bool>,
}

fn map_kernel_err(err: MiniGridError) -> EngineError {
    match err {
        MiniGridError::UnknownTask(id) => EngineError::Validation(format!("unsupported env_name: {id}")),
        MiniGridError::InvalidConfig(msg) => EngineError::Validation(format!("bad config: {msg}")),
        MiniGridError::InvalidAction(code) => EngineError::Validation(format!("invalid action index {code}")),
        other @ MiniGridError::PlacementExhausted { .. } => EngineError::Internal(other.to_string()),
    }
}

fn make_env(cfg: &Config) -> Result<MiniGridEnv, EngineError> {
    let name = cfg.env_name.as_deref().unwrap_or("MiniGrid-Empty-5x5-v0");
    MiniGridEnv::from_task_with(name, |c| {
        if let Some(ms) = cfg.max_steps { c.max_steps = ms; }
        if let Some(seed) = cfg.seed { c.seed = Some(seed); }
        if let Some(v) = cfg.agent_view_size { c.agent_view_size = v; }
        if let Some(see) = cfg.see_through_walls { c.see_through_walls = see; }
    })
    .map_err(map_kernel_err)
}

/// Accepts action names ("forward") or raw indices (2).
fn parse_action(v: &Json) -> Result<Action, EngineError> {
    if let Some(name) = v.as_str() {
        return Action::from_name(name).ok_or_else(|| EngineError::Validation(format!("invalid action '{name}'")));
    }
    if let Some(code) = v.as_u64() {
        let code = u8::try_from(code).map_err(|_| EngineError::Validation(format!("invalid action index {code}")))?;
        return Action::try_from(code).map_err(map_kernel_err);
    }
    Err(EngineError::Validation(format!("action must be a name or index, got {v}")))
}

pub struct MiniGridEnvironment {
    env: MiniGridEnv,
    /// Set once `initialize` has handed out the episode built by `new`.
    initialized: bool,
}

impl MiniGridEnvironment {
    pub fn new(cfg: Config) -> Result<Self, EngineError> {
        Ok(Self { env: make_env(&cfg)?, initialized: false })
    }

    pub fn engine(&self) -> &MiniGridEnv {
        &self.env
    }

    fn snapshot_obs(&self, event: &str) -> Observation {
        let pubst = self.env.public_state();
        let carrying = pubst.carrying.map(|(k, c)| json!({"type": k as u8, "color": c as u8}));
        let image = self.env.render().to_nested();
        let truncated = self.env.truncated();
        let public = json!({
            "image": image,
            "grid_array": pubst.grid_array,
            "agent_pos": [pubst.agent_pos.0, pubst.agent_pos.1],
            "agent_dir": pubst.agent_dir,
            "carrying": carrying,
            "step_count": pubst.step_count,
            "max_steps": pubst.max_steps,
            "mission": pubst.mission,
            "terminated": pubst.terminated,
            "truncated": truncated,
            "reward_last": self.env.reward_last(),
            "total_reward": self.env.total_reward(),
            "event": event,
        });
        Observation { terminated: pubst.terminated, truncated, reward: self.env.reward_last() as f64, data: public }
    }
}

#[async_trait]
impl Environment for MiniGridEnvironment {
    /// The first call reports the episode generated at construction, so a
    /// seeded adapter starts on the same layout as a seeded kernel. Later
    /// calls start a new episode.
    async fn initialize(&mut self) -> Result<Observation, EngineError> {
        if self.initialized {
            self.env.reset().map_err(map_kernel_err)?;
        }
        self.initialized = true;
        Ok(self.snapshot_obs("initialize"))
    }

    async fn step(&mut self, tool_calls: Vec<ToolCall>) -> Result<Observation, EngineError> {
        let call = tool_calls.first().ok_or_else(|| EngineError::Validation("no tool_calls".into()))?;
        if call.tool != "interact" {
            return Err(EngineError::Validation(format!("unknown tool: {}", call.tool)));
        }
        let args = &call.args;
        if let Some(a) = args.get("action") {
            let act = parse_action(a)?;
            self.env.step(act);
        } else if let Some(arr) = args.get("actions").and_then(|v| v.as_array()) {
            // Validate the whole batch before touching the world.
            let acts = arr.iter().map(parse_action).collect::<Result<Vec<_>, _>>()?;
            for act in acts {
                self.env.step(act);
                if self.env.done() {
                    break;
                }
            }
        } else {
            return Err(EngineError::Validation("missing 'action' or 'actions'".into()));
        }
        Ok(self.snapshot_obs("step"))
    }

    async fn terminate(&mut self) -> Result<Observation, EngineError> {
        Ok(self.snapshot_obs("terminate"))
    }

    async fn checkpoint(&self) -> Result<Snapshot, EngineError> {
        let pubst = self.env.public_state();
        let grid = serde_json::to_value(self.env.grid()).map_err(|e| EngineError::Internal(e.to_string()))?;
        let carrying = serde_json::to_value(self.env.carrying()).map_err(|e| EngineError::Internal(e.to_string()))?;
        let data = json!({
            "grid": grid,
            "grid_array": pubst.grid_array,
            "agent_pos": [pubst.agent_pos.0, pubst.agent_pos.1],
            "agent_dir": pubst.agent_dir,
            "carrying": carrying,
            "step_count": pubst.step_count,
            "max_steps": pubst.max_steps,
            "mission": pubst.mission,
            "terminated": pubst.terminated,
        });
        Ok(Snapshot { version: 1, engine: "minigrid".into(), data })
    }
}

pub fn register_default_env() {
    register_environment_with_config(
        "MiniGrid",
        Arc::new(|cfg| {
            let cfg: Config = match cfg {
                Some(v) => serde_json::from_value(v).map_err(|e| EngineError::Validation(format!("bad config: {e}")))?,
                None => Config::default(),
            };
            tracing::debug!(env_name = ?cfg.env_name, seed = ?cfg.seed, "creating minigrid environment");
            Ok(Box::new(MiniGridEnvironment::new(cfg)?))
        }),
    );
}
