//! Flat row-major grid buffers shared by every generation pass.

use serde::{Deserialize, Serialize};

use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self { width, height, cells: vec![value; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        self.in_bounds(x, y).then(|| self.cells[self.index(x, y)])
    }

    pub fn at(&self, pos: Pos) -> Option<T> {
        self.get(pos.x, pos.y)
    }

    /// Writes `value` when `(x, y)` is inside the grid; returns whether it did.
    pub fn set(&mut self, x: i32, y: i32, value: T) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let index = self.index(x, y);
        self.cells[index] = value;
        true
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<T> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn count(&self, mut predicate: impl FnMut(T) -> bool) -> usize {
        self.cells.iter().filter(|&&cell| predicate(cell)).count()
    }

    pub fn map<U: Copy>(&self, mut f: impl FnMut(Pos, T) -> U) -> Grid<U> {
        let cells = self.positions().zip(self.cells.iter()).map(|(pos, &cell)| f(pos, cell)).collect();
        Grid { width: self.width, height: self.height, cells }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y as usize) * self.width + (x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_return_none_and_writes_are_ignored() {
        let mut grid = Grid::filled(4, 3, 0_u8);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert!(!grid.set(4, 2, 9));
        assert!(grid.set(3, 2, 9));
        assert_eq!(grid.get(3, 2), Some(9));
        assert_eq!(grid.cells()[2 * 4 + 3], 9);
    }

    #[test]
    fn positions_walk_rows_in_order() {
        let grid = Grid::filled(3, 2, ());
        let positions: Vec<Pos> = grid.positions().collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], Pos { y: 0, x: 0 });
        assert_eq!(positions[3], Pos { y: 1, x: 0 });
        assert_eq!(positions[5], Pos { y: 1, x: 2 });
    }

    #[test]
    fn map_keeps_dimensions() {
        let grid = Grid::filled(5, 2, 1_u8);
        let doubled = grid.map(|pos, cell| u32::from(cell) * 2 + pos.x as u32);
        assert_eq!(doubled.width(), 5);
        assert_eq!(doubled.height(), 2);
        assert_eq!(doubled.get(4, 1), Some(6));
    }
}
