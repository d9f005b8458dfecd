//! Hand-built worlds with fixed layouts and starts. Handy for tests and for
//! reproducing a specific situation without a seed.

use crate::config::EnvConfig;
use crate::generator::FixedLayout;
use crate::grid::Grid;
use crate::object::WorldObj;
use crate::types::{Color, Direction};

pub const PRESET_NAMES: [&str; 7] = [
    "empty_5x5",
    "doorkey_inline",
    "four_rooms",
    "unlock_simple",
    "unlockpickup_simple",
    "lava_inline",
    "box_key_inline",
];

pub fn preset(name: &str) -> Option<(FixedLayout, EnvConfig)> {
    Some(match name {
        "empty_5x5" => empty_5x5(),
        "doorkey_inline" => doorkey_inline(),
        "four_rooms" => four_rooms_19x19(),
        "unlock_simple" => unlock_simple(),
        "unlockpickup_simple" => unlockpickup_simple(),
        "lava_inline" => lava_inline(),
        "box_key_inline" => box_key_inline(),
        _ => return None,
    })
}

fn fixed(grid: Grid, max_steps: u32, mission: &str) -> (FixedLayout, EnvConfig) {
    let cfg = EnvConfig { width: grid.width(), height: grid.height(), max_steps, ..EnvConfig::default() };
    (FixedLayout::new(grid, (1, 1), Direction::Right, mission), cfg)
}

pub fn empty_5x5() -> (FixedLayout, EnvConfig) {
    let mut grid = Grid::walled(5, 5);
    grid.set(3, 3, WorldObj::goal());
    fixed(grid, 100, "Get to the green goal square")
}

/// Agent (1,1), key at (2,1), locked door at (3,1), goal at (3,3).
pub fn doorkey_inline() -> (FixedLayout, EnvConfig) {
    let mut grid = Grid::walled(5, 5);
    grid.set(2, 1, WorldObj::key(Color::Yellow));
    grid.set(3, 1, WorldObj::door(Color::Yellow, false, true));
    grid.set(3, 3, WorldObj::goal());
    fixed(grid, 100, "Unlock the door and reach the goal")
}

pub fn four_rooms_19x19() -> (FixedLayout, EnvConfig) {
    let (w, h) = (19, 19);
    let mut grid = Grid::walled(w, h);
    let midx = w / 2;
    grid.vert_wall(midx, 1, h - 2);
    grid.set(midx, 5, WorldObj::empty());
    grid.set(midx, 13, WorldObj::empty());
    let midy = h / 2;
    grid.horz_wall(1, midy, w - 2);
    grid.set(5, midy, WorldObj::empty());
    grid.set(13, midy, WorldObj::empty());
    grid.set(w - 2, h - 2, WorldObj::goal());
    fixed(grid, 400, "Navigate through four rooms to reach the goal")
}

/// 7x7 with a horizontal wall and a locked door at (3,3); key in the upper room.
pub fn unlock_simple() -> (FixedLayout, EnvConfig) {
    let mut grid = Grid::walled(7, 7);
    grid.horz_wall(1, 3, 5);
    grid.set(3, 3, WorldObj::door(Color::Green, false, true));
    grid.set(2, 1, WorldObj::key(Color::Green));
    grid.set(5, 5, WorldObj::goal());
    fixed(grid, 200, "Unlock the door and reach the goal")
}

/// 7x7 with a vertical wall and a locked door at (3,3); a ball waits behind it.
pub fn unlockpickup_simple() -> (FixedLayout, EnvConfig) {
    let mut grid = Grid::walled(7, 7);
    grid.vert_wall(3, 1, 5);
    grid.set(3, 3, WorldObj::door(Color::Blue, false, true));
    grid.set(2, 1, WorldObj::key(Color::Blue));
    grid.set(4, 4, WorldObj::ball(Color::Purple));
    grid.set(5, 5, WorldObj::goal());
    fixed(grid, 200, "Unlock, pick up the object, and reach the goal")
}

pub fn lava_inline() -> (FixedLayout, EnvConfig) {
    let mut grid = Grid::walled(5, 5);
    grid.set(2, 1, WorldObj::lava());
    grid.set(3, 3, WorldObj::goal());
    fixed(grid, 50, "Avoid lava and reach the goal")
}

/// A purple box holding a yellow key sits in front of the agent.
pub fn box_key_inline() -> (FixedLayout, EnvConfig) {
    let mut grid = Grid::walled(5, 5);
    grid.set(2, 1, WorldObj::boxed(Color::Purple, Some(WorldObj::key(Color::Yellow))));
    grid.set(3, 3, WorldObj::goal());
    fixed(grid, 100, "Open the box, take the key, and reach the goal")
}
