use crate::config::EnvConfig;
use crate::engine::MiniGridEnv;
use crate::error::MiniGridError;
use crate::generator::{DoorKey, EmptyRoom, GridGenerator};
use crate::presets;

pub const TASK_IDS: [&str; 10] = [
    "MiniGrid-Empty-5x5-v0",
    "MiniGrid-Empty-Random-5x5-v0",
    "MiniGrid-Empty-6x6-v0",
    "MiniGrid-Empty-Random-6x6-v0",
    "MiniGrid-Empty-8x8-v0",
    "MiniGrid-Empty-16x16-v0",
    "MiniGrid-DoorKey-5x5-v0",
    "MiniGrid-DoorKey-6x6-v0",
    "MiniGrid-DoorKey-8x8-v0",
    "MiniGrid-DoorKey-16x16-v0",
];

/// Pull the `NxN` size out of ids such as `MiniGrid-Empty-8x8-v0`.
fn parse_size(id: &str) -> Option<i32> {
    let dims = id.split('-').find(|part| part.contains('x'))?;
    let (w, h) = dims.split_once('x')?;
    let (w, h) = (w.parse::<i32>().ok()?, h.parse::<i32>().ok()?);
    (w == h).then_some(w)
}

/// Generator and config for a registered task id or a preset name.
pub fn make_task(task_id: &str) -> Result<(Box<dyn GridGenerator>, EnvConfig), MiniGridError> {
    if let Some((layout, cfg)) = presets::preset(task_id) {
        let generator: Box<dyn GridGenerator> = Box::new(layout);
        return Ok((generator, cfg));
    }
    if !TASK_IDS.contains(&task_id) {
        return Err(MiniGridError::UnknownTask(task_id.to_string()));
    }
    let size = parse_size(task_id).ok_or_else(|| MiniGridError::UnknownTask(task_id.to_string()))?;
    let cells = (size * size) as u32;
    let (generator, max_steps): (Box<dyn GridGenerator>, u32) = if task_id.starts_with("MiniGrid-Empty-Random-") {
        (Box::new(EmptyRoom::random_start()), 4 * cells)
    } else if task_id.starts_with("MiniGrid-Empty-") {
        (Box::new(EmptyRoom::default()), 4 * cells)
    } else {
        (Box::new(DoorKey), 10 * cells)
    };
    Ok((generator, EnvConfig::square(size, max_steps)))
}

impl MiniGridEnv {
    /// Build a task with its registered config, letting `adjust` override fields
    /// (seed, view size, ...) before validation.
    pub fn from_task_with(task_id: &str, adjust: impl FnOnce(&mut EnvConfig)) -> Result<Self, MiniGridError> {
        let (generator, mut cfg) = make_task(task_id)?;
        adjust(&mut cfg);
        MiniGridEnv::new(cfg, generator)
    }

    pub fn from_task(task_id: &str) -> Result<Self, MiniGridError> {
        Self::from_task_with(task_id, |_| {})
    }
}
