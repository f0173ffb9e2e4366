//! Integer grid geometry for cell-based maps.
//!
//! This crate contains 2-D grid primitives that are independent of any map,
//! engine, or runtime. Cells are integer (x, z) coordinates; operations take
//! plain data and return results, making them unit-testable and portable.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`boundary`] | Infinite lines through cell centers, side-of-line tests |
//! | [`cell`] | Cell coordinates, cardinal directions, averaging |
//! | [`error`] | Geometry error type shared across the crate |
//! | [`line`] | Cell-to-cell line rasterization and line-walk translation |
//! | [`rect`] | Axis-aligned cell rectangles and edge iteration |
//! | [`triangle`] | Triangular regions: containment, clipping, sampling |

pub mod boundary;
pub mod cell;
pub mod error;
pub mod line;
pub mod rect;
pub mod triangle;

pub use boundary::{cell_is_between, BoundaryLine};
pub use cell::{average, average_weighted, closest_cell_to, Cell, Direction};
pub use error::GeometryError;
pub use line::{line_between, translate_toward, translate_toward_until, GridLine};
pub use rect::CellRect;
pub use triangle::{
    random_triangular_bisections, right_triangle_area, triangle_side, CellTriangle,
};
