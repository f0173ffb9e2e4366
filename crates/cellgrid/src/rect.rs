//! Axis-aligned integer rectangles of cells.

use crate::cell::Cell;
use serde::{Deserialize, Serialize};

/// An inclusive axis-aligned rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl CellRect {
    pub const fn new(min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> Self {
        CellRect {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// The smallest rectangle covering both corner cells, in either order.
    pub fn from_limits(a: Cell, b: Cell) -> Self {
        CellRect {
            min_x: a.x.min(b.x),
            max_x: a.x.max(b.x),
            min_z: a.z.min(b.z),
            max_z: a.z.max(b.z),
        }
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> i32 {
        self.max_z - self.min_z + 1
    }

    pub fn center(&self) -> Cell {
        Cell::new(
            self.min_x + (self.max_x - self.min_x) / 2,
            self.min_z + (self.max_z - self.min_z) / 2,
        )
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min_x && cell.x <= self.max_x && cell.z >= self.min_z && cell.z <= self.max_z
    }

    /// Coordinate-wise clamp of a cell into the rectangle.
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.x.clamp(self.min_x, self.max_x),
            cell.z.clamp(self.min_z, self.max_z),
        )
    }

    /// All cells of the rectangle, row by row from the south-west corner.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (self.min_z..=self.max_z)
            .flat_map(move |z| (self.min_x..=self.max_x).map(move |x| Cell::new(x, z)))
    }

    /// The perimeter cells of the rectangle, corners included.
    pub fn edge_cells(self) -> impl Iterator<Item = Cell> {
        self.cells().filter(move |c| {
            c.x == self.min_x || c.x == self.max_x || c.z == self.min_z || c.z == self.max_z
        })
    }

    /// The perimeter cells sans corners, walked south-east-north-west.
    pub fn cornerless_edge_cells(self) -> impl Iterator<Item = Cell> {
        let south = (self.min_x + 1..self.max_x).map(move |x| Cell::new(x, self.min_z));
        let east = (self.min_z + 1..self.max_z).map(move |z| Cell::new(self.max_x, z));
        let north = (self.min_x + 1..self.max_x)
            .rev()
            .map(move |x| Cell::new(x, self.max_z));
        let west = (self.min_z + 1..self.max_z)
            .rev()
            .map(move |z| Cell::new(self.min_x, z));
        south.chain(east).chain(north).chain(west)
    }

    /// The edge cell furthest from `point` by squared distance.
    ///
    /// Only edge cells can ever be furthest when every cell is eligible,
    /// so the interior is not scanned.
    pub fn furthest_cell_from(self, point: Cell) -> Cell {
        self.furthest_cell_from_where(point, true, |_| true)
    }

    /// The furthest cell from `point` among those passing `validator`.
    ///
    /// Falls back to the rectangle's center when nothing qualifies.
    pub fn furthest_cell_from_where<F>(self, point: Cell, edge_only: bool, validator: F) -> Cell
    where
        F: Fn(Cell) -> bool,
    {
        let mut result = self.center();
        let mut best_dist = 0i64;

        let mut consider = |cell: Cell| {
            let dist = cell.distance_squared_to(point);
            if dist > best_dist {
                best_dist = dist;
                result = cell;
            }
        };

        if edge_only {
            for cell in self.edge_cells() {
                if validator(cell) {
                    consider(cell);
                }
            }
        } else {
            for cell in self.cells() {
                if validator(cell) {
                    consider(cell);
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_limits_normalizes() {
        let r = CellRect::from_limits(Cell::new(5, -1), Cell::new(-2, 3));
        assert_eq!(r, CellRect::new(-2, 5, -1, 3));
        assert_eq!(r.width(), 8);
        assert_eq!(r.height(), 5);
    }

    #[test]
    fn test_cells_cover_area() {
        let r = CellRect::new(0, 3, 0, 2);
        let cells: Vec<Cell> = r.cells().collect();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[11], Cell::new(3, 2));
        assert!(cells.iter().all(|&c| r.contains(c)));
    }

    #[test]
    fn test_contains_and_clamp() {
        let r = CellRect::new(-1, 4, 0, 6);
        assert!(r.contains(Cell::new(0, 0)));
        assert!(!r.contains(Cell::new(5, 0)));
        assert_eq!(r.clamp(Cell::new(10, -3)), Cell::new(4, 0));
        assert_eq!(r.clamp(Cell::new(2, 2)), Cell::new(2, 2));
    }

    #[test]
    fn test_edge_cells() {
        let r = CellRect::new(0, 3, 0, 3);
        let edge: Vec<Cell> = r.edge_cells().collect();
        assert_eq!(edge.len(), 12);
        assert!(edge.contains(&Cell::new(0, 0)));
        assert!(edge.contains(&Cell::new(3, 3)));
        assert!(!edge.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn test_cornerless_edge_cells() {
        let r = CellRect::new(0, 4, 0, 3);
        let cells: Vec<Cell> = r.cornerless_edge_cells().collect();
        // 2*(w-2) + 2*(h-2)
        assert_eq!(cells.len(), 2 * 3 + 2 * 2);
        let corners = [
            Cell::new(0, 0),
            Cell::new(4, 0),
            Cell::new(0, 3),
            Cell::new(4, 3),
        ];
        assert!(cells.iter().all(|c| !corners.contains(c)));
        // Walk starts on the south edge, one in from the corner.
        assert_eq!(cells[0], Cell::new(1, 0));
    }

    #[test]
    fn test_furthest_cell_from() {
        let r = CellRect::new(0, 10, 0, 10);
        assert_eq!(r.furthest_cell_from(Cell::new(0, 0)), Cell::new(10, 10));
    }

    #[test]
    fn test_furthest_cell_with_validator() {
        let r = CellRect::new(0, 10, 0, 10);
        let far = r.furthest_cell_from_where(Cell::new(0, 0), true, |c| c.x < 5);
        assert_eq!(far, Cell::new(4, 10));
    }

    #[test]
    fn test_furthest_cell_none_valid_falls_back_to_center() {
        let r = CellRect::new(0, 4, 0, 4);
        let cell = r.furthest_cell_from_where(Cell::new(0, 0), true, |_| false);
        assert_eq!(cell, r.center());
    }
}
