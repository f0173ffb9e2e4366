//! Cell-to-cell line rasterization.
//!
//! A line between two cells is walked as straight runs along the dominant
//! axis broken up by diagonal steps, one diagonal per unit of travel on the
//! minor axis. Every step moves to an adjacent cell (8-connected) and the
//! walk visits exactly `1 + max(|dx|, |dz|)` cells, endpoints included.

use crate::cell::Cell;
use crate::error::GeometryError;

/// Iterator over the cells of a rasterized line, start to target inclusive.
#[derive(Debug, Clone)]
pub struct GridLine {
    cur: Cell,
    dx: i32,
    dz: i32,
    run: i32,
    base: i32,
    extra: i32,
    started: bool,
}

/// Rasterizes the line from `a` to `b`. When `a == b` the line is the
/// single cell `a`.
pub fn line_between(a: Cell, b: Cell) -> GridLine {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    let major = dx.abs().max(dz.abs());
    let minor = dx.abs().min(dz.abs());

    // Straight travel on the major axis is split into minor + 1 runs.
    // The first r + 1 of them carry one extra step.
    let d = major / (minor + 1);
    let r = major % (minor + 1);
    let base = d - 1;
    let mut extra = r + 1;

    let run = if extra > 0 {
        extra -= 1;
        base + 1
    } else {
        base
    };

    GridLine {
        cur: a,
        dx,
        dz,
        run,
        base,
        extra,
        started: false,
    }
}

impl GridLine {
    fn refill_run(&mut self) {
        self.run = if self.extra > 0 {
            self.extra -= 1;
            self.base + 1
        } else {
            self.base
        };
    }
}

impl Iterator for GridLine {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if !self.started {
            self.started = true;
            return Some(self.cur);
        }
        if self.dx == 0 && self.dz == 0 {
            return None;
        }

        let sx = self.dx.signum();
        let sz = self.dz.signum();

        let step = if self.dx == 0 {
            Cell::new(0, sz)
        } else if self.dz == 0 {
            Cell::new(sx, 0)
        } else if self.dx.abs() == self.dz.abs() {
            Cell::new(sx, sz)
        } else if self.run > 0 {
            self.run -= 1;
            if self.dx.abs() > self.dz.abs() {
                Cell::new(sx, 0)
            } else {
                Cell::new(0, sz)
            }
        } else {
            self.refill_run();
            Cell::new(sx, sz)
        };

        self.cur = self.cur + step;
        self.dx -= step.x;
        self.dz -= step.z;
        Some(self.cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dx.abs().max(self.dz.abs()) as usize + usize::from(!self.started);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridLine {}

impl std::iter::FusedIterator for GridLine {}

/// Moves `cell` exactly `amount` steps along the line toward `target`.
///
/// `amount` of zero returns `cell` itself. Fails when the line is shorter
/// than the requested travel.
pub fn translate_toward(cell: Cell, target: Cell, amount: usize) -> Result<Cell, GeometryError> {
    line_between(cell, target)
        .nth(amount)
        .ok_or(GeometryError::LineExhausted {
            from: cell,
            to: target,
            requested: amount,
        })
}

/// Moves `cell` along the line toward `target` until `predicate` accepts a
/// cell, and returns that cell. `cell` itself is tested first.
pub fn translate_toward_until<F>(
    cell: Cell,
    target: Cell,
    mut predicate: F,
) -> Result<Cell, GeometryError>
where
    F: FnMut(Cell) -> bool,
{
    line_between(cell, target)
        .find(|&c| predicate(c))
        .ok_or(GeometryError::PredicateUnsatisfied {
            from: cell,
            to: target,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacent(a: Cell, b: Cell) -> bool {
        let d = b - a;
        d.x.abs() <= 1 && d.z.abs() <= 1 && (d.x != 0 || d.z != 0)
    }

    #[test]
    fn test_single_cell_line() {
        let cells: Vec<Cell> = line_between(Cell::new(3, -2), Cell::new(3, -2)).collect();
        assert_eq!(cells, vec![Cell::new(3, -2)]);
    }

    #[test]
    fn test_straight_lines() {
        let cells: Vec<Cell> = line_between(Cell::new(0, 0), Cell::new(4, 0)).collect();
        assert_eq!(
            cells,
            (0..=4).map(|x| Cell::new(x, 0)).collect::<Vec<Cell>>()
        );

        let cells: Vec<Cell> = line_between(Cell::new(1, 3), Cell::new(1, -1)).collect();
        assert_eq!(
            cells,
            (-1..=3).rev().map(|z| Cell::new(1, z)).collect::<Vec<Cell>>()
        );
    }

    #[test]
    fn test_diagonal_line() {
        let cells: Vec<Cell> = line_between(Cell::new(0, 0), Cell::new(-3, 3)).collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(-1, 1),
                Cell::new(-2, 2),
                Cell::new(-3, 3),
            ]
        );
    }

    #[test]
    fn test_shallow_line_path() {
        let cells: Vec<Cell> = line_between(Cell::new(0, 0), Cell::new(6, 2)).collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(3, 1),
                Cell::new(4, 1),
                Cell::new(5, 2),
                Cell::new(6, 2),
            ]
        );
    }

    #[test]
    fn test_length_law_over_grid() {
        let a = Cell::new(0, 0);
        for x in -6..=6 {
            for z in -6..=6 {
                let b = Cell::new(x, z);
                let expected = 1 + x.abs().max(z.abs()) as usize;
                let line = line_between(a, b);
                assert_eq!(line.len(), expected, "size_hint for {}", b);
                let cells: Vec<Cell> = line.collect();
                assert_eq!(cells.len(), expected, "length for {}", b);
                assert_eq!(cells[0], a);
                assert_eq!(*cells.last().unwrap(), b);
                for pair in cells.windows(2) {
                    assert!(adjacent(pair[0], pair[1]), "gap in line to {}", b);
                }
                let mut sorted = cells.clone();
                sorted.sort_by_key(|c| (c.x, c.z));
                sorted.dedup();
                assert_eq!(sorted.len(), cells.len(), "repeat in line to {}", b);
            }
        }
    }

    #[test]
    fn test_fused_after_end() {
        let mut line = line_between(Cell::new(0, 0), Cell::new(1, 1));
        assert!(line.nth(1).is_some());
        assert!(line.next().is_none());
        assert!(line.next().is_none());
    }

    #[test]
    fn test_translate_toward() {
        let moved = translate_toward(Cell::new(0, 0), Cell::new(10, 0), 4).unwrap();
        assert_eq!(moved, Cell::new(4, 0));

        let stayed = translate_toward(Cell::new(2, 2), Cell::new(10, 0), 0).unwrap();
        assert_eq!(stayed, Cell::new(2, 2));
    }

    #[test]
    fn test_translate_toward_past_end() {
        let err = translate_toward(Cell::new(0, 0), Cell::new(2, 0), 5).unwrap_err();
        assert_eq!(
            err,
            GeometryError::LineExhausted {
                from: Cell::new(0, 0),
                to: Cell::new(2, 0),
                requested: 5,
            }
        );
    }

    #[test]
    fn test_translate_toward_until() {
        let found =
            translate_toward_until(Cell::new(0, 0), Cell::new(8, 4), |c| c.z == 2).unwrap();
        assert_eq!(found.z, 2);

        let err = translate_toward_until(Cell::new(0, 0), Cell::new(3, 0), |c| c.x > 5);
        assert!(matches!(err, Err(GeometryError::PredicateUnsatisfied { .. })));
    }
}
