//! Grid cells, cardinal directions, and cell arithmetic.
//!
//! A [`Cell`] is an immutable pair of integer coordinates `(x, z)` on a
//! 2-D grid (x grows east, z grows north). Equality is by value, and the
//! distinguished [`Cell::INVALID`] sentinel stands in for "no such cell"
//! in searches that can come up empty.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A single integer-coordinate unit of the 2-D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    /// Sentinel for "no such cell". Never produced by ordinary arithmetic.
    pub const INVALID: Cell = Cell {
        x: i32::MIN,
        z: i32::MIN,
    };

    pub const fn new(x: i32, z: i32) -> Self {
        Cell { x, z }
    }

    pub fn is_valid(self) -> bool {
        self != Cell::INVALID
    }

    /// Squared euclidean distance to another cell. Widened to `i64` so
    /// far-apart cells cannot overflow.
    pub fn distance_squared_to(self, other: Cell) -> i64 {
        let dx = (other.x - self.x) as i64;
        let dz = (other.z - self.z) as i64;
        dx * dx + dz * dz
    }

    /// True if `self` is clockwise of `other` in the x-z plane, as seen
    /// from `pivot` (compass sense: north, then east, then south).
    ///
    /// Collinear cells are not clockwise of each other.
    pub fn is_clockwise_of(self, other: Cell, pivot: Cell) -> bool {
        let va = self - pivot;
        let vb = other - pivot;
        (va.z as i64) * (vb.x as i64) - (va.x as i64) * (vb.z as i64) < 0
    }

    /// Average of `self` and the given cells, truncating toward zero.
    pub fn average_with(self, others: &[Cell]) -> Cell {
        average(std::iter::once(self).chain(others.iter().copied()))
    }

    /// The cell `amount` steps from `self` along a cardinal direction.
    pub fn translated(self, dir: Direction, amount: i32) -> Cell {
        self + dir.as_cell() * amount
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl AddAssign for Cell {
    fn add_assign(&mut self, rhs: Cell) {
        self.x += rhs.x;
        self.z += rhs.z;
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl Mul<i32> for Cell {
    type Output = Cell;

    fn mul(self, rhs: i32) -> Cell {
        Cell::new(self.x * rhs, self.z * rhs)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Average an iterator of cells with integer (truncating) division.
///
/// Returns [`Cell::INVALID`] for an empty iterator.
pub fn average<I: IntoIterator<Item = Cell>>(cells: I) -> Cell {
    average_weighted(cells, |_| 1)
}

/// Average an iterator of cells, where `multiplicity` is effectively the
/// number of times each cell is counted.
pub fn average_weighted<I, F>(cells: I, multiplicity: F) -> Cell
where
    I: IntoIterator<Item = Cell>,
    F: Fn(Cell) -> i64,
{
    let mut total_x = 0i64;
    let mut total_z = 0i64;
    let mut count = 0i64;

    for cell in cells {
        let m = multiplicity(cell);
        total_x += cell.x as i64 * m;
        total_z += cell.z as i64 * m;
        count += m;
    }

    if count == 0 {
        Cell::INVALID
    } else {
        Cell::new((total_x / count) as i32, (total_z / count) as i32)
    }
}

/// The cell of the iterator closest to `to` by squared distance, or
/// [`Cell::INVALID`] if the iterator is empty.
pub fn closest_cell_to<I: IntoIterator<Item = Cell>>(cells: I, to: Cell) -> Cell {
    let mut best = Cell::INVALID;
    let mut best_dist = i64::MAX;

    for cell in cells {
        let dist = cell.distance_squared_to(to);
        if dist < best_dist {
            best_dist = dist;
            best = cell;
        }
    }

    best
}

/// A cardinal grid direction. Byte order follows the compass clockwise:
/// north, east, south, west.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// Unit cell vector for this direction.
    pub fn as_cell(self) -> Cell {
        match self {
            Direction::North => Cell::new(0, 1),
            Direction::East => Cell::new(1, 0),
            Direction::South => Cell::new(0, -1),
            Direction::West => Cell::new(-1, 0),
        }
    }

    /// This direction shifted clockwise by `quarter_turns` quarter turns.
    pub fn rotated_cw(self, quarter_turns: u8) -> Direction {
        match (self as u8 + quarter_turns) % 4 {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }

    /// The cardinal direction facing `to` from the perspective of `from`,
    /// chosen by quadrant comparison. Axis-aligned offsets map exactly;
    /// `from == to` faces north.
    pub fn facing(from: Cell, to: Cell) -> Direction {
        let dir = to - from;

        if dir.x == 0 {
            return if dir.z < 0 {
                Direction::South
            } else {
                Direction::North
            };
        }
        if dir.z == 0 {
            return if dir.x < 0 {
                Direction::West
            } else {
                Direction::East
            };
        }

        if dir.x > 0 {
            if dir.z > 0 {
                // Quadrant I
                if dir.x > dir.z {
                    Direction::East
                } else {
                    Direction::North
                }
            } else {
                // Quadrant IV
                if dir.x > -dir.z {
                    Direction::East
                } else {
                    Direction::South
                }
            }
        } else if dir.z > 0 {
            // Quadrant II
            if -dir.x > dir.z {
                Direction::West
            } else {
                Direction::North
            }
        } else {
            // Quadrant III
            if dir.x < dir.z {
                Direction::West
            } else {
                Direction::South
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_arithmetic() {
        let a = Cell::new(3, -2);
        let b = Cell::new(-1, 5);
        assert_eq!(a + b, Cell::new(2, 3));
        assert_eq!(a - b, Cell::new(4, -7));
        assert_eq!(b * 3, Cell::new(-3, 15));
    }

    #[test]
    fn test_invalid_sentinel() {
        assert!(!Cell::INVALID.is_valid());
        assert!(Cell::new(0, 0).is_valid());
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Cell::new(0, 0).distance_squared_to(Cell::new(3, 4)), 25);
        assert_eq!(Cell::new(-2, 1).distance_squared_to(Cell::new(-2, 1)), 0);
    }

    #[test]
    fn test_clockwise() {
        let origin = Cell::new(0, 0);
        let east = Cell::new(5, 0);
        let north = Cell::new(0, 5);
        // East is clockwise of north on a compass; not the reverse.
        assert!(east.is_clockwise_of(north, origin));
        assert!(!north.is_clockwise_of(east, origin));
        // Collinear cells are not clockwise of each other.
        assert!(!east.is_clockwise_of(Cell::new(10, 0), origin));
    }

    #[test]
    fn test_average_empty_is_invalid() {
        assert_eq!(average(std::iter::empty()), Cell::INVALID);
    }

    #[test]
    fn test_average_truncates() {
        let cells = [Cell::new(0, 0), Cell::new(5, 5), Cell::new(5, 0)];
        // (10/3, 5/3) truncates to (3, 1)
        assert_eq!(average(cells.iter().copied()), Cell::new(3, 1));
    }

    #[test]
    fn test_average_weighted() {
        let cells = [Cell::new(0, 0), Cell::new(10, 0)];
        let heavy_right = average_weighted(cells.iter().copied(), |c| if c.x > 0 { 3 } else { 1 });
        assert_eq!(heavy_right, Cell::new(7, 0));
    }

    #[test]
    fn test_average_with() {
        let centre = Cell::new(0, 0).average_with(&[Cell::new(4, 4)]);
        assert_eq!(centre, Cell::new(2, 2));
    }

    #[test]
    fn test_closest_cell() {
        let cells = [Cell::new(10, 10), Cell::new(2, 2), Cell::new(-5, 0)];
        assert_eq!(closest_cell_to(cells.iter().copied(), Cell::new(0, 0)), Cell::new(2, 2));
        assert_eq!(closest_cell_to(std::iter::empty(), Cell::new(0, 0)), Cell::INVALID);
    }

    #[test]
    fn test_direction_vectors() {
        assert_eq!(Direction::North.as_cell(), Cell::new(0, 1));
        assert_eq!(Direction::East.as_cell(), Cell::new(1, 0));
        assert_eq!(Direction::South.as_cell(), Cell::new(0, -1));
        assert_eq!(Direction::West.as_cell(), Cell::new(-1, 0));
    }

    #[test]
    fn test_direction_rotation() {
        assert_eq!(Direction::North.rotated_cw(1), Direction::East);
        assert_eq!(Direction::West.rotated_cw(2), Direction::East);
        assert_eq!(Direction::South.rotated_cw(4), Direction::South);
    }

    #[test]
    fn test_facing_axes() {
        let o = Cell::new(0, 0);
        assert_eq!(Direction::facing(o, Cell::new(4, 0)), Direction::East);
        assert_eq!(Direction::facing(o, Cell::new(0, -4)), Direction::South);
        assert_eq!(Direction::facing(o, o), Direction::North);
    }

    #[test]
    fn test_facing_quadrants() {
        let o = Cell::new(0, 0);
        assert_eq!(Direction::facing(o, Cell::new(5, 2)), Direction::East);
        assert_eq!(Direction::facing(o, Cell::new(2, 5)), Direction::North);
        assert_eq!(Direction::facing(o, Cell::new(-5, -2)), Direction::West);
        assert_eq!(Direction::facing(o, Cell::new(-2, -5)), Direction::South);
        assert_eq!(Direction::facing(o, Cell::new(5, -2)), Direction::East);
        assert_eq!(Direction::facing(o, Cell::new(-5, 2)), Direction::West);
    }

    #[test]
    fn test_translated() {
        let c = Cell::new(1, 1).translated(Direction::North, 3);
        assert_eq!(c, Cell::new(1, 4));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Cell::new(3, -7)).unwrap();
        assert_eq!(json, r#"{"x":3,"z":-7}"#);
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Cell::new(3, -7));
    }
}
