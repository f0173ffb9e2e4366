//! Error type for invalid geometric constructions and exhausted walks.

use crate::cell::Cell;

/// Errors produced by fallible constructions and line walks.
///
/// Everything here is a local, recoverable condition: callers get the
/// error back as a value and decide what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A span was required between two distinct cells, but both were the same.
    CoincidentCells { a: Cell, b: Cell },
    /// A triangle was constructed with collinear (or duplicate) vertices.
    DegenerateTriangle { a: Cell, b: Cell, c: Cell },
    /// A direction was required, but origin and target coincide.
    NoDirection { origin: Cell },
    /// A line walk ended before reaching the requested offset.
    LineExhausted {
        from: Cell,
        to: Cell,
        requested: usize,
    },
    /// A line walk ended without the predicate ever holding.
    PredicateUnsatisfied { from: Cell, to: Cell },
    /// A right triangle was requested with zero width.
    ZeroWidth,
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::CoincidentCells { a, b } => {
                write!(f, "Cannot derive a line between coincident cells {} and {}", a, b)
            }
            GeometryError::DegenerateTriangle { a, b, c } => {
                write!(
                    f,
                    "Tried to construct a triangle from collinear cells: a={}, b={}, c={}",
                    a, b, c
                )
            }
            GeometryError::NoDirection { origin } => {
                write!(f, "Direction undefined: origin and target are both {}", origin)
            }
            GeometryError::LineExhausted {
                from,
                to,
                requested,
            } => {
                write!(
                    f,
                    "Line from {} to {} is shorter than the requested offset {}",
                    from, to, requested
                )
            }
            GeometryError::PredicateUnsatisfied { from, to } => {
                write!(
                    f,
                    "No cell on the line from {} to {} satisfied the predicate",
                    from, to
                )
            }
            GeometryError::ZeroWidth => {
                write!(f, "Tried to build a right triangle area with zero width")
            }
        }
    }
}

impl std::error::Error for GeometryError {}
