//! Infinite boundary lines through cell centers and half-plane tests.
//!
//! A boundary line is the real line through two cell centers, kept as slope
//! and z-intercept. Vertical lines are stored by their x coordinate and
//! report an infinite slope.

use crate::cell::Cell;
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum LineKind {
    Sloped { slope: f32, z_intercept: f32 },
    Vertical { x: f32 },
}

/// An infinite line through two cell centers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryLine {
    kind: LineKind,
}

impl BoundaryLine {
    /// The line through `a` and `b`. Fails when the cells coincide.
    pub fn between(a: Cell, b: Cell) -> Result<Self, GeometryError> {
        if a == b {
            return Err(GeometryError::CoincidentCells { a, b });
        }
        Ok(Self::derive(a, b))
    }

    /// Non-failing form used where the caller guarantees or tolerates
    /// degenerate input. Coincident cells produce the vertical line
    /// through them.
    pub(crate) fn derive(a: Cell, b: Cell) -> Self {
        let kind = if a.x == b.x {
            LineKind::Vertical { x: a.x as f32 }
        } else {
            let slope = (b.z - a.z) as f32 / (b.x - a.x) as f32;
            LineKind::Sloped {
                slope,
                z_intercept: a.z as f32 - slope * a.x as f32,
            }
        };
        BoundaryLine { kind }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self.kind, LineKind::Vertical { .. })
    }

    /// Slope of the line, infinite when vertical.
    pub fn slope(&self) -> f32 {
        match self.kind {
            LineKind::Sloped { slope, .. } => slope,
            LineKind::Vertical { .. } => f32::INFINITY,
        }
    }

    /// Z value where the line crosses x = 0, infinite when vertical.
    pub fn z_intercept(&self) -> f32 {
        match self.kind {
            LineKind::Sloped { z_intercept, .. } => z_intercept,
            LineKind::Vertical { .. } => f32::INFINITY,
        }
    }

    /// Whether `cell` lies strictly above the line. Vertical lines have no
    /// above side.
    pub fn cell_is_above(&self, cell: Cell) -> bool {
        match self.kind {
            LineKind::Sloped { slope, z_intercept } => {
                cell.z as f32 > slope * cell.x as f32 + z_intercept
            }
            LineKind::Vertical { .. } => false,
        }
    }

    /// Whether `cell` lies strictly on the low-x side of the line. For a
    /// horizontal line this degenerates to the low-z side.
    pub fn cell_is_left(&self, cell: Cell) -> bool {
        match self.kind {
            LineKind::Sloped { slope, z_intercept } => {
                if slope == 0.0 {
                    (cell.z as f32) < z_intercept
                } else {
                    (cell.x as f32) < (cell.z as f32 - z_intercept) / slope
                }
            }
            LineKind::Vertical { x } => (cell.x as f32) < x,
        }
    }
}

/// Whether `cell` lies in the region between `line_a` and `line_b`.
///
/// The test picks a side predicate from the slope signs of the two lines:
/// lines through the same slope quadrant compare their left tests for
/// equality, lines through opposite quadrants for inequality, and parallel
/// lines fall back to the above test.
pub fn cell_is_between(line_a: &BoundaryLine, line_b: &BoundaryLine, cell: Cell) -> bool {
    let slope_a = line_a.slope();
    let slope_b = line_b.slope();

    let a_pos = slope_a > 0.0;
    let b_pos = slope_b > 0.0;
    let opposite_signs = a_pos != b_pos;
    let same_quadrant = !opposite_signs && slope_a > slope_b;
    let opposite_quadrants = !opposite_signs && slope_a < slope_b;

    if same_quadrant || (b_pos && !a_pos) {
        line_a.cell_is_left(cell) == line_b.cell_is_left(cell)
    } else if opposite_quadrants || (a_pos && !b_pos) {
        line_a.cell_is_left(cell) != line_b.cell_is_left(cell)
    } else {
        line_a.cell_is_above(cell) != line_b.cell_is_above(cell)
    }
}
