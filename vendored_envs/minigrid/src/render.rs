//! Egocentric partial observation: cut the agent's viewport out of the grid,
//! turn it so the agent always faces up from the bottom-centre cell, and hide
//! whatever opaque objects block from view.

use crate::grid::Grid;
use crate::object::WorldObj;
use crate::types::Direction;

/// Square block of cells, indexed `[row][col]`.
pub type ViewGrid = Vec<Vec<WorldObj>>;

/// Visibility per viewport cell, indexed `[row][col]` in the rotated frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityMask {
    size: usize,
    cells: Vec<bool>,
}

impl VisibilityMask {
    pub fn new(size: usize, value: bool) -> Self {
        Self { size, cells: vec![value; size * size] }
    }
    pub fn size(&self) -> usize { self.size }
    pub fn get(&self, row: usize, col: usize) -> bool { self.cells[row * self.size + col] }
    pub fn set(&mut self, row: usize, col: usize, value: bool) { self.cells[row * self.size + col] = value; }
    pub fn count_visible(&self) -> usize { self.cells.iter().filter(|&&v| v).count() }
}

/// Absolute grid coordinates of the viewport's top-left cell.
pub fn view_origin(agent_pos: (i32, i32), dir: Direction, view_size: i32) -> (i32, i32) {
    let (x, y) = agent_pos;
    let half = view_size / 2;
    match dir {
        Direction::Right => (x, y - half),
        Direction::Down => (x - half, y),
        Direction::Left => (x - view_size + 1, y - half),
        Direction::Up => (x - half, y - view_size + 1),
    }
}

/// Copy a `view_size`x`view_size` window starting at `origin`; cells outside
/// the grid read as walls.
pub fn extract_view(grid: &Grid, origin: (i32, i32), view_size: i32) -> ViewGrid {
    (0..view_size)
        .map(|i| {
            (0..view_size)
                .map(|j| {
                    let (x, y) = (origin.0 + j, origin.1 + i);
                    if grid.in_bounds(x, y) { grid.get(x, y).clone() } else { WorldObj::wall() }
                })
                .collect()
        })
        .collect()
}

/// One counter-clockwise quarter turn: `new[size-1-x][y] = old[y][x]`.
pub fn rotate_ccw(view: &ViewGrid) -> ViewGrid {
    let size = view.len();
    let mut out = vec![vec![WorldObj::empty(); size]; size];
    for (y, row) in view.iter().enumerate() {
        for (x, obj) in row.iter().enumerate() {
            out[size - 1 - x][y] = obj.clone();
        }
    }
    out
}

/// Line-of-sight propagation from the agent cell (bottom-centre). Each row,
/// bottom to top, is swept left-to-right then right-to-left; a visible cell
/// that can be seen behind lights its sweep-direction neighbour and, below
/// the top row, the cells diagonally and directly above it.
pub fn visibility_mask(view: &ViewGrid) -> VisibilityMask {
    let size = view.len();
    let mut mask = VisibilityMask::new(size, false);
    if size == 0 {
        return mask;
    }
    mask.set(size - 1, size / 2, true);

    for j in (0..size).rev() {
        for i in 0..size - 1 {
            if !mask.get(j, i) || !view[j][i].can_see_behind() {
                continue;
            }
            mask.set(j, i + 1, true);
            if j > 0 {
                mask.set(j - 1, i + 1, true);
                mask.set(j - 1, i, true);
            }
        }
        for i in (1..size).rev() {
            if !mask.get(j, i) || !view[j][i].can_see_behind() {
                continue;
            }
            mask.set(j, i - 1, true);
            if j > 0 {
                mask.set(j - 1, i - 1, true);
                mask.set(j - 1, i, true);
            }
        }
    }
    mask
}

/// Everything needed to draw one observation.
#[derive(Debug, Clone, Copy)]
pub struct ViewRequest<'a> {
    pub grid: &'a Grid,
    pub agent_pos: (i32, i32),
    pub agent_dir: Direction,
    pub carrying: &'a WorldObj,
    pub view_size: i32,
    pub see_through_walls: bool,
}

/// Agent-relative view with occluded cells blanked and the carried object
/// shown in the agent's own cell.
pub fn agent_view(req: &ViewRequest<'_>) -> (ViewGrid, VisibilityMask) {
    let size = req.view_size;
    let origin = view_origin(req.agent_pos, req.agent_dir, size);
    let mut view = extract_view(req.grid, origin, size);
    for _ in 0..=req.agent_dir.index() {
        view = rotate_ccw(&view);
    }

    let n = size as usize;
    let mask = if req.see_through_walls {
        VisibilityMask::new(n, true)
    } else {
        let mask = visibility_mask(&view);
        for (row, cells) in view.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                if !mask.get(row, col) {
                    *cell = WorldObj::empty();
                }
            }
        }
        mask
    };

    view[n - 1][n / 2] = req.carrying.clone();
    (view, mask)
}

/// Write the observation into `out`, laid out `[x][y][channel]` (column
/// first, i.e. transposed with respect to the view rows). Only visible cells
/// are written; the caller is expected to hand in a zeroed buffer.
pub fn render_into(req: &ViewRequest<'_>, out: &mut [u8]) -> VisibilityMask {
    let n = req.view_size as usize;
    contract!(out.len() == n * n * 3, "observation buffer holds {} bytes, expected {}", out.len(), n * n * 3);
    let (view, mask) = agent_view(req);
    for (y, row) in view.iter().enumerate() {
        for (x, obj) in row.iter().enumerate() {
            if mask.get(y, x) {
                let base = (x * n + y) * 3;
                out[base..base + 3].copy_from_slice(&obj.encode());
            }
        }
    }
    mask
}
