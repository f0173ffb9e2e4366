//! Triangular cell regions.
//!
//! A `CellTriangle` holds three vertex cells and the boundary line through
//! each vertex pair. Vertex order is normalized at construction so that the
//! side tests in [`cell_is_between`] classify the interior consistently.
//! The interior cell list is computed lazily by scanning the bounding box
//! and cached until the vertices change.

use crate::boundary::{cell_is_between, BoundaryLine};
use crate::cell::Cell;
use crate::error::GeometryError;
use crate::line::{line_between, GridLine};
use crate::rect::CellRect;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::mem;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellTriangle {
    a: Cell,
    b: Cell,
    c: Cell,
    line_ab: BoundaryLine,
    line_ac: BoundaryLine,
    line_bc: BoundaryLine,
    #[serde(skip)]
    interior: Option<Vec<Cell>>,
}

impl CellTriangle {
    /// Builds the triangle with vertices `a`, `b` and `c`. Fails when the
    /// vertices are collinear, which includes any two being equal.
    pub fn new(a: Cell, mut b: Cell, mut c: Cell) -> Result<Self, GeometryError> {
        let va = b - a;
        let vb = c - a;
        let cross = va.z as i64 * vb.x as i64 - va.x as i64 * vb.z as i64;
        if cross == 0 {
            return Err(GeometryError::DegenerateTriangle { a, b, c });
        }

        if !b.is_clockwise_of(c, a) {
            mem::swap(&mut b, &mut c);
        }

        Ok(CellTriangle {
            a,
            b,
            c,
            line_ab: BoundaryLine::derive(a, b),
            line_ac: BoundaryLine::derive(a, c),
            line_bc: BoundaryLine::derive(b, c),
            interior: None,
        })
    }

    /// Builds an isoceles triangle rooted at `origin`, opening toward
    /// `target`: the direction vector is scaled to `side_length` and rotated
    /// by plus and minus `half_angle` degrees to place the two far vertices,
    /// each rounded to the nearest cell.
    pub fn from_apex(
        origin: Cell,
        target: Cell,
        half_angle: f32,
        side_length: f32,
    ) -> Result<Self, GeometryError> {
        if origin == target {
            return Err(GeometryError::NoDirection { origin });
        }

        let dx = (target.x - origin.x) as f32;
        let dz = (target.z - origin.z) as f32;
        let len = (dx * dx + dz * dz).sqrt();
        let sx = dx / len * side_length;
        let sz = dz / len * side_length;

        let (bx, bz) = rotate_deg(sx, sz, half_angle);
        let (cx, cz) = rotate_deg(sx, sz, -half_angle);

        let b = Cell::new(origin.x + bx.round() as i32, origin.z + bz.round() as i32);
        let c = Cell::new(origin.x + cx.round() as i32, origin.z + cz.round() as i32);

        Self::new(origin, b, c)
    }

    pub fn a(&self) -> Cell {
        self.a
    }

    pub fn b(&self) -> Cell {
        self.b
    }

    pub fn c(&self) -> Cell {
        self.c
    }

    /// Vertex average, truncated toward zero.
    pub fn center(&self) -> Cell {
        self.a.average_with(&[self.b, self.c])
    }

    /// The smallest rectangle covering all three vertices.
    pub fn bounding_rect(&self) -> CellRect {
        CellRect::new(
            self.a.x.min(self.b.x).min(self.c.x),
            self.a.x.max(self.b.x).max(self.c.x),
            self.a.z.min(self.b.z).min(self.c.z),
            self.a.z.max(self.b.z).max(self.c.z),
        )
    }

    /// Whether `cell` lies inside the triangle.
    pub fn contains(&self, cell: Cell) -> bool {
        cell_is_between(&self.line_ab, &self.line_ac, cell)
            && cell_is_between(&self.line_bc, &self.line_ab, cell)
    }

    /// Clamps each vertex into `rect` coordinate-wise and recomputes the
    /// boundary lines. A per-vertex clamp, not a geometric clip, so a vertex
    /// moved on both axes can distort the shape. Vertices may collapse onto
    /// one another; the triangle stays queryable and simply covers fewer
    /// cells. The cached interior is discarded.
    pub fn clip_inside(&mut self, rect: CellRect) {
        self.a = rect.clamp(self.a);
        self.b = rect.clamp(self.b);
        self.c = rect.clamp(self.c);
        self.line_ab = BoundaryLine::derive(self.a, self.b);
        self.line_ac = BoundaryLine::derive(self.a, self.c);
        self.line_bc = BoundaryLine::derive(self.b, self.c);
        self.interior = None;
    }

    /// The cells inside the triangle, computed on first access and cached.
    pub fn cells(&mut self) -> &[Cell] {
        self.ensure_interior();
        self.interior.as_deref().unwrap_or_default()
    }

    pub fn cell_count(&mut self) -> usize {
        self.cells().len()
    }

    /// Rasterized edge from `a` to `b`.
    pub fn edge_ab(&self) -> GridLine {
        line_between(self.a, self.b)
    }

    /// Rasterized edge from `a` to `c`.
    pub fn edge_ac(&self) -> GridLine {
        line_between(self.a, self.c)
    }

    /// Rasterized edge from `b` to `c`.
    pub fn edge_bc(&self) -> GridLine {
        line_between(self.b, self.c)
    }

    /// All three rasterized edges, shared vertices repeated.
    pub fn edges(&self) -> impl Iterator<Item = Cell> {
        self.edge_ab().chain(self.edge_ac()).chain(self.edge_bc())
    }

    /// One uniform random interior cell, or `None` when the triangle
    /// covers no cells.
    pub fn random_cell(&mut self, rng: &mut impl Rng) -> Option<Cell> {
        self.cells().choose(rng).copied()
    }

    /// Up to `num` distinct uniform random interior cells.
    pub fn random_unique_cells(&mut self, num: usize, rng: &mut impl Rng) -> Vec<Cell> {
        self.random_unique_cells_where(num, rng, |_| true)
    }

    /// Up to `num` distinct uniform random interior cells passing
    /// `validator`.
    ///
    /// Draws indexes with retry on collision; once a fresh index cannot be
    /// found within as many retries as there are interior cells, the draw
    /// stops and the result is short. A rejected candidate consumes its
    /// index, so a strict validator can under-deliver as well.
    pub fn random_unique_cells_where<F>(
        &mut self,
        mut num: usize,
        rng: &mut impl Rng,
        validator: F,
    ) -> Vec<Cell>
    where
        F: Fn(Cell) -> bool,
    {
        self.ensure_interior();
        let cells = self.interior.as_deref().unwrap_or_default();
        if cells.is_empty() {
            return Vec::new();
        }
        num = num.min(cells.len());

        let mut result = Vec::with_capacity(num);
        let mut used = HashSet::new();
        let mut index = rng.gen_range(0..cells.len());

        while num > 0 {
            let mut i = 0;
            while used.contains(&index) && i < cells.len() {
                index = rng.gen_range(0..cells.len());
                i += 1;
            }

            if i == cells.len() {
                break;
            }

            used.insert(index);

            let cell = cells[index];
            if validator(cell) {
                result.push(cell);
                num -= 1;
            }
        }

        result
    }

    /// One uniform random interior cell passing `validator`, retrying at
    /// most once per interior cell.
    pub fn try_random_cell_where<F>(&mut self, rng: &mut impl Rng, validator: F) -> Option<Cell>
    where
        F: Fn(Cell) -> bool,
    {
        self.ensure_interior();
        let cells = self.interior.as_deref().unwrap_or_default();

        for _ in 0..cells.len() {
            let cell = *cells.choose(rng)?;
            if validator(cell) {
                return Some(cell);
            }
        }

        None
    }

    pub fn try_random_cell(&mut self, rng: &mut impl Rng) -> Option<Cell> {
        self.try_random_cell_where(rng, |_| true)
    }

    fn ensure_interior(&mut self) {
        if self.interior.is_some() {
            return;
        }

        let bounds = self.bounding_rect();
        let interior: Vec<Cell> = bounds.cells().filter(|&cell| self.contains(cell)).collect();
        self.interior = Some(interior);
    }
}

/// Rotates the vector `(x, z)` counterclockwise by `degrees`.
pub fn rotate_deg(x: f32, z: f32, degrees: f32) -> (f32, f32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (x * cos - z * sin, x * sin + z * cos)
}

/// Scales the vector `(x, z)` down to `max` length when it is longer.
pub fn clamp_magnitude(x: f32, z: f32, max: f32) -> (f32, f32) {
    let len = (x * x + z * z).sqrt();
    if len > max && len > 0.0 {
        let scale = max / len;
        (x * scale, z * scale)
    } else {
        (x, z)
    }
}

/// Rasterized cells of one side of an isoceles triangle rooted at `apex`:
/// the direction toward `toward` is clamped to `side_length`, rotated by
/// `angle` degrees, and walked from the apex (or from `min_dist` along the
/// side when positive) to its far end.
pub fn triangle_side(
    apex: Cell,
    toward: Cell,
    angle: f32,
    side_length: f32,
    min_dist: f32,
) -> Result<Vec<Cell>, GeometryError> {
    if apex == toward {
        return Err(GeometryError::NoDirection { origin: apex });
    }

    let dx = (toward.x - apex.x) as f32;
    let dz = (toward.z - apex.z) as f32;
    let (dx, dz) = clamp_magnitude(dx, dz, side_length);

    let (ex, ez) = rotate_deg(dx, dz, angle);
    let end = Cell::new(apex.x + ex.round() as i32, apex.z + ez.round() as i32);

    let start = if min_dist > 0.0 {
        let (mx, mz) = clamp_magnitude(dx, dz, min_dist);
        let (sx, sz) = rotate_deg(mx, mz, angle);
        Cell::new(apex.x + sx.round() as i32, apex.z + sz.round() as i32)
    } else {
        apex
    };

    Ok(line_between(start, end).collect())
}

/// `num` random chords of the isoceles triangle rooted at `apex`: both
/// sides are rasterized, a row index is drawn uniformly per chord, and the
/// line between the two side cells at that index is emitted.
pub fn random_triangular_bisections(
    apex: Cell,
    toward: Cell,
    half_angle: f32,
    side_length: f32,
    min_dist: f32,
    num: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Cell>, GeometryError> {
    let side_b = triangle_side(apex, toward, half_angle, side_length, min_dist)?;
    let side_c = triangle_side(apex, toward, -half_angle, side_length, min_dist)?;

    let max_i = side_b.len().min(side_c.len());
    let mut cells = Vec::new();

    for _ in 0..num {
        let i = rng.gen_range(0..max_i);
        cells.extend(line_between(side_b[i], side_c[i]));
    }

    Ok(cells)
}

/// Cells of the axis-aligned right triangle with its square corner at
/// `apex`, a horizontal leg `width` cells long (negative extends west) and
/// a vertical leg of the same length extending north when `up` is set,
/// south otherwise. Rows are filled against the rasterized hypotenuse.
pub fn right_triangle_area(
    apex: Cell,
    width: i32,
    up: bool,
) -> Result<Vec<Cell>, GeometryError> {
    if width == 0 {
        return Err(GeometryError::ZeroWidth);
    }

    let b = Cell::new(apex.x + width, apex.z);
    let rise = if up { width.abs() } else { -width.abs() };
    let c = Cell::new(apex.x, apex.z + rise);

    let x_inc = if width < 0 { -1 } else { 1 };
    let z_inc = if up { 1 } else { -1 };

    let hyp: Vec<Cell> = line_between(b, c).collect();

    let mut cells = Vec::new();
    let mut cell = apex;
    cells.push(cell);

    for h in &hyp {
        while cell.x != h.x {
            cell.x += x_inc;
            cells.push(cell);
        }

        cell.x = apex.x;

        if cell.z != c.z {
            cell.z += z_inc;
            cells.push(cell);
        }
    }

    Ok(cells)
}
