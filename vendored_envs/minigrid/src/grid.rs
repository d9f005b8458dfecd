use serde::{Deserialize, Serialize};

use crate::object::WorldObj;

/// Fixed-size cell storage, row-major: `cells[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Vec<WorldObj>>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        contract!(width > 0 && height > 0, "grid dimensions must be positive, got {width}x{height}");
        Self { width, height, cells: vec![vec![WorldObj::empty(); width as usize]; height as usize] }
    }

    /// Empty room enclosed by a one-cell wall ring.
    pub fn walled(width: i32, height: i32) -> Self {
        let mut grid = Self::new(width, height);
        grid.wall_rect(0, 0, width, height);
        grid
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> &WorldObj {
        contract!(self.in_bounds(x, y), "cell ({x},{y}) outside {}x{} grid", self.width, self.height);
        &self.cells[y as usize][x as usize]
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> &mut WorldObj {
        contract!(self.in_bounds(x, y), "cell ({x},{y}) outside {}x{} grid", self.width, self.height);
        &mut self.cells[y as usize][x as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, obj: WorldObj) {
        *self.get_mut(x, y) = obj;
    }

    /// Take the object out of a cell, leaving Empty behind.
    pub fn take(&mut self, x: i32, y: i32) -> WorldObj {
        std::mem::take(self.get_mut(x, y))
    }

    pub fn horz_wall(&mut self, x: i32, y: i32, length: i32) {
        for i in x..x + length {
            self.set(i, y, WorldObj::wall());
        }
    }

    pub fn vert_wall(&mut self, x: i32, y: i32, length: i32) {
        for j in y..y + length {
            self.set(x, j, WorldObj::wall());
        }
    }

    /// Outline of a `w`x`h` rectangle whose top-left corner is `(x, y)`.
    pub fn wall_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.horz_wall(x, y, w);
        self.horz_wall(x, y + h - 1, w);
        self.vert_wall(x, y, h);
        self.vert_wall(x + w - 1, y, h);
    }

    /// `[h][w][3]` channel encoding of every cell.
    pub fn encode(&self) -> Vec<Vec<[u8; 3]>> {
        self.cells.iter().map(|row| row.iter().map(WorldObj::encode).collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectKind;

    #[test]
    fn walled_grid_has_border_ring() {
        let g = Grid::walled(5, 4);
        for y in 0..4 {
            for x in 0..5 {
                let border = x == 0 || y == 0 || x == 4 || y == 3;
                let expect = if border { ObjectKind::Wall } else { ObjectKind::Empty };
                assert_eq!(g.get(x, y).kind(), expect, "cell ({x},{y})");
            }
        }
    }

    #[test]
    fn encode_is_row_major() {
        let mut g = Grid::new(3, 2);
        g.set(2, 0, WorldObj::goal());
        let enc = g.encode();
        assert_eq!(enc.len(), 2);
        assert_eq!(enc[0].len(), 3);
        assert_eq!(enc[0][2][0], ObjectKind::Goal as u8);
    }

    #[test]
    fn take_leaves_empty() {
        let mut g = Grid::new(3, 3);
        g.set(1, 1, WorldObj::lava());
        assert_eq!(g.take(1, 1).kind(), ObjectKind::Lava);
        assert!(g.get(1, 1).is_empty());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_access_is_fatal() {
        let g = Grid::new(3, 3);
        let _ = g.get(3, 0);
    }
}
