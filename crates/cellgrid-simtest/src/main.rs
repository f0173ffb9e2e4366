//! Cellgrid Headless Geometry Harness
//!
//! Sweeps the grid geometry invariants over ranges no unit test covers.
//! Runs entirely in-process — no map, no rendering.
//!
//! Usage:
//!   cargo run -p cellgrid-simtest
//!   cargo run -p cellgrid-simtest -- --verbose
//!   cargo run -p cellgrid-simtest -- --json

use cellgrid::{
    average, cell_is_between, line_between, right_triangle_area, translate_toward, BoundaryLine,
    Cell, CellRect, CellTriangle,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Serialize)]
struct Summary {
    total: usize,
    passed: usize,
    failed: usize,
    failures: Vec<String>,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");

    if !json {
        println!("=== Cellgrid Geometry Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Line rasterization sweep
    results.extend(validate_lines(json));

    // 2. Boundary line classification
    results.extend(validate_boundaries(json));

    // 3. Triangle containment and clipping
    results.extend(validate_triangles(json));

    // 4. Random sampling (seeded)
    results.extend(validate_sampling(json));

    // 5. Grid utilities
    results.extend(validate_utilities(json));

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if json {
        let summary = Summary {
            total,
            passed,
            failed,
            failures: results
                .iter()
                .filter(|r| !r.passed)
                .map(|r| format!("{}: {}", r.name, r.detail))
                .collect(),
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("failed to serialize summary: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed, total, failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Line rasterization ───────────────────────────────────────────────

fn validate_lines(json: bool) -> Vec<TestResult> {
    if !json {
        println!("--- Line Rasterization ---");
    }
    let mut results = Vec::new();

    let origins = [Cell::new(0, 0), Cell::new(3, -2), Cell::new(-7, 11)];
    let mut checked = 0usize;
    let mut length_bad = 0usize;
    let mut endpoint_bad = 0usize;
    let mut adjacency_bad = 0usize;
    let mut repeat_bad = 0usize;

    for origin in origins {
        for dx in -8..=8 {
            for dz in -8..=8 {
                let target = origin + Cell::new(dx, dz);
                let cells: Vec<Cell> = line_between(origin, target).collect();
                checked += 1;

                let expected = 1 + dx.abs().max(dz.abs()) as usize;
                if cells.len() != expected {
                    length_bad += 1;
                }
                if cells.first() != Some(&origin) || cells.last() != Some(&target) {
                    endpoint_bad += 1;
                }
                if cells.windows(2).any(|p| {
                    let d = p[1] - p[0];
                    d.x.abs() > 1 || d.z.abs() > 1 || (d.x == 0 && d.z == 0)
                }) {
                    adjacency_bad += 1;
                }
                let mut sorted = cells.clone();
                sorted.sort_by_key(|c| (c.x, c.z));
                sorted.dedup();
                if sorted.len() != cells.len() {
                    repeat_bad += 1;
                }
            }
        }
    }

    results.push(TestResult {
        name: "line_length_law".into(),
        passed: length_bad == 0,
        detail: format!("{}/{} lines at 1 + max(|dx|,|dz|) cells", checked - length_bad, checked),
    });
    results.push(TestResult {
        name: "line_endpoints".into(),
        passed: endpoint_bad == 0,
        detail: format!("{} lines with wrong endpoints", endpoint_bad),
    });
    results.push(TestResult {
        name: "line_adjacency".into(),
        passed: adjacency_bad == 0,
        detail: format!("{} lines with non-adjacent steps", adjacency_bad),
    });
    results.push(TestResult {
        name: "line_no_repeats".into(),
        passed: repeat_bad == 0,
        detail: format!("{} lines with repeated cells", repeat_bad),
    });

    let translated = translate_toward(Cell::new(0, 0), Cell::new(20, 0), 6);
    results.push(TestResult {
        name: "translate_toward".into(),
        passed: translated == Ok(Cell::new(6, 0)),
        detail: format!("{:?}", translated),
    });
    let overshoot = translate_toward(Cell::new(0, 0), Cell::new(2, 0), 10);
    results.push(TestResult {
        name: "translate_toward_overshoot_errors".into(),
        passed: overshoot.is_err(),
        detail: format!("{:?}", overshoot),
    });

    results
}

// ── 2. Boundary lines ───────────────────────────────────────────────────

fn validate_boundaries(json: bool) -> Vec<TestResult> {
    if !json {
        println!("--- Boundary Lines ---");
    }
    let mut results = Vec::new();

    let vertical = BoundaryLine::between(Cell::new(4, 0), Cell::new(4, 9));
    results.push(TestResult {
        name: "vertical_sentinel".into(),
        passed: matches!(&vertical, Ok(l) if l.is_vertical() && l.slope() == f32::INFINITY),
        detail: "vertical line reports infinite slope".into(),
    });

    let coincident = BoundaryLine::between(Cell::new(1, 1), Cell::new(1, 1));
    results.push(TestResult {
        name: "coincident_rejected".into(),
        passed: coincident.is_err(),
        detail: format!("{:?}", coincident.err()),
    });

    // z = x and z = -x carve the north and south wedges.
    let up = BoundaryLine::between(Cell::new(0, 0), Cell::new(6, 6));
    let down = BoundaryLine::between(Cell::new(0, 0), Cell::new(6, -6));
    let wedge_ok = match (&up, &down) {
        (Ok(up), Ok(down)) => {
            cell_is_between(up, down, Cell::new(0, 7))
                && cell_is_between(up, down, Cell::new(0, -7))
                && !cell_is_between(up, down, Cell::new(7, 0))
                && !cell_is_between(up, down, Cell::new(-7, 0))
        }
        _ => false,
    };
    results.push(TestResult {
        name: "wedge_classification".into(),
        passed: wedge_ok,
        detail: "north/south wedge between crossing diagonals".into(),
    });

    // Parallel horizontals bound a strip.
    let low = BoundaryLine::between(Cell::new(0, 0), Cell::new(9, 0));
    let high = BoundaryLine::between(Cell::new(0, 6), Cell::new(9, 6));
    let strip_ok = match (&low, &high) {
        (Ok(low), Ok(high)) => {
            (1..6).all(|z| cell_is_between(low, high, Cell::new(50, z)))
                && !cell_is_between(low, high, Cell::new(0, -1))
                && !cell_is_between(low, high, Cell::new(0, 7))
        }
        _ => false,
    };
    results.push(TestResult {
        name: "parallel_strip".into(),
        passed: strip_ok,
        detail: "strip between parallel horizontals".into(),
    });

    results
}

// ── 3. Triangles ────────────────────────────────────────────────────────

fn validate_triangles(json: bool) -> Vec<TestResult> {
    if !json {
        println!("--- Triangles ---");
    }
    let mut results = Vec::new();

    let targets = [
        Cell::new(10, 0),
        Cell::new(10, 10),
        Cell::new(0, 10),
        Cell::new(-10, 10),
        Cell::new(-10, 0),
        Cell::new(-10, -10),
        Cell::new(0, -10),
        Cell::new(10, -10),
    ];

    let apex = Cell::new(0, 0);
    let mut facing_bad = Vec::new();
    let mut bounded_bad = Vec::new();

    for target in targets {
        let mut tri = match CellTriangle::from_apex(apex, target, 30.0, 10.0) {
            Ok(t) => t,
            Err(e) => {
                facing_bad.push(format!("{}: {}", target, e));
                continue;
            }
        };

        let toward = match translate_toward(apex, target, 2) {
            Ok(c) => c,
            Err(e) => {
                facing_bad.push(format!("{}: {}", target, e));
                continue;
            }
        };

        if !tri.contains(toward) {
            facing_bad.push(format!("{}: {} not contained", target, toward));
        }

        // Every contained cell of a generous window must fall in the
        // bounding box, and the interior cache must agree with a scan.
        let window = CellRect::new(-30, 30, -30, 30);
        let scanned = window.cells().filter(|&c| tri.contains(c)).count();
        let bounds = tri.bounding_rect();
        let in_bounds = window
            .cells()
            .filter(|&c| tri.contains(c))
            .all(|c| bounds.contains(c));
        if !in_bounds || scanned != tri.cell_count() {
            bounded_bad.push(format!(
                "{}: scan {} vs cached {}",
                target,
                scanned,
                tri.cell_count()
            ));
        }
    }

    results.push(TestResult {
        name: "apex_triangles_contain_axis".into(),
        passed: facing_bad.is_empty(),
        detail: if facing_bad.is_empty() {
            format!("{} facings verified", targets.len())
        } else {
            facing_bad.join("; ")
        },
    });
    results.push(TestResult {
        name: "interior_bounded_and_cached".into(),
        passed: bounded_bad.is_empty(),
        detail: if bounded_bad.is_empty() {
            "window scans match cached interiors".into()
        } else {
            bounded_bad.join("; ")
        },
    });

    // Clip idempotence and shrink.
    let mut tri = match CellTriangle::from_apex(apex, Cell::new(10, 0), 30.0, 10.0) {
        Ok(t) => t,
        Err(e) => {
            results.push(TestResult {
                name: "clip_behavior".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let before: Vec<Cell> = tri.cells().to_vec();
    tri.clip_inside(CellRect::new(-50, 50, -50, 50));
    let noop = tri.cells() == before.as_slice();

    let clip = CellRect::new(0, 4, -5, 5);
    tri.clip_inside(clip);
    let clipped: Vec<Cell> = tri.cells().to_vec();
    let shrunk = clipped.len() < before.len() && clipped.iter().all(|&c| clip.contains(c));

    results.push(TestResult {
        name: "clip_idempotent_then_shrinks".into(),
        passed: noop && shrunk,
        detail: format!(
            "full {} cells, clipped {} cells",
            before.len(),
            clipped.len()
        ),
    });

    tri.clip_inside(CellRect::new(0, 0, 0, 0));
    results.push(TestResult {
        name: "collapsed_clip_queryable".into(),
        passed: tri.cell_count() == 0,
        detail: format!("{} cells after full collapse", tri.cell_count()),
    });

    results
}

// ── 4. Sampling ─────────────────────────────────────────────────────────

fn validate_sampling(json: bool) -> Vec<TestResult> {
    if !json {
        println!("--- Random Sampling ---");
    }
    let mut results = Vec::new();

    let mut tri = match CellTriangle::from_apex(Cell::new(0, 0), Cell::new(10, 0), 30.0, 10.0) {
        Ok(t) => t,
        Err(e) => {
            results.push(TestResult {
                name: "sampling_setup".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let mut rng = StdRng::seed_from_u64(42);
    let count = tri.cell_count();

    let picked = tri.random_unique_cells(10, &mut rng);
    let mut sorted = picked.clone();
    sorted.sort_by_key(|c| (c.x, c.z));
    sorted.dedup();
    let distinct = sorted.len() == picked.len();
    let contained = picked.iter().all(|&c| tri.contains(c));
    results.push(TestResult {
        name: "unique_cells_distinct_contained".into(),
        passed: picked.len() == 10 && distinct && contained,
        detail: format!("{} drawn from {} interior cells", picked.len(), count),
    });

    let all = tri.random_unique_cells(count + 100, &mut rng);
    let mut all_sorted = all.clone();
    all_sorted.sort_by_key(|c| (c.x, c.z));
    all_sorted.dedup();
    results.push(TestResult {
        name: "unique_cells_capped".into(),
        passed: all.len() <= count && all_sorted.len() == all.len(),
        detail: format!(
            "{} distinct returned for oversize request over {} cells",
            all.len(),
            count
        ),
    });

    let rejected = tri.random_unique_cells_where(5, &mut rng, |_| false);
    results.push(TestResult {
        name: "validator_shortfall".into(),
        passed: rejected.is_empty(),
        detail: format!("{} cells past a rejecting validator", rejected.len()),
    });

    let one = tri.try_random_cell(&mut rng);
    results.push(TestResult {
        name: "try_random_cell".into(),
        passed: matches!(one, Some(c) if tri.contains(c)),
        detail: format!("{:?}", one),
    });

    results
}

// ── 5. Grid utilities ───────────────────────────────────────────────────

fn validate_utilities(json: bool) -> Vec<TestResult> {
    if !json {
        println!("--- Grid Utilities ---");
    }
    let mut results = Vec::new();

    // Cornerless perimeter length law over a few sizes.
    let mut cornerless_bad = Vec::new();
    for (w, h) in [(3, 3), (5, 4), (8, 8), (20, 3)] {
        let rect = CellRect::new(0, w - 1, 0, h - 1);
        let got = rect.cornerless_edge_cells().count();
        let expected = (2 * (w - 2) + 2 * (h - 2)) as usize;
        if got != expected {
            cornerless_bad.push(format!("{}x{}: {} vs {}", w, h, got, expected));
        }
    }
    results.push(TestResult {
        name: "cornerless_edge_count".into(),
        passed: cornerless_bad.is_empty(),
        detail: if cornerless_bad.is_empty() {
            "2(w-2) + 2(h-2) holds".into()
        } else {
            cornerless_bad.join("; ")
        },
    });

    // Right triangle areas are triangular numbers of the width.
    let mut right_bad = Vec::new();
    for width in [-4, -2, 1, 2, 5] {
        for up in [true, false] {
            match right_triangle_area(Cell::new(0, 0), width, up) {
                Ok(cells) => {
                    let w = width.abs() as usize;
                    let expected = (w + 1) * (w + 2) / 2;
                    if cells.len() != expected {
                        right_bad.push(format!(
                            "width {} up {}: {} vs {}",
                            width,
                            up,
                            cells.len(),
                            expected
                        ));
                    }
                }
                Err(e) => right_bad.push(format!("width {} up {}: {}", width, up, e)),
            }
        }
    }
    results.push(TestResult {
        name: "right_triangle_cell_count".into(),
        passed: right_bad.is_empty(),
        detail: if right_bad.is_empty() {
            "(w+1)(w+2)/2 holds".into()
        } else {
            right_bad.join("; ")
        },
    });

    let zero = right_triangle_area(Cell::new(0, 0), 0, true);
    results.push(TestResult {
        name: "right_triangle_zero_width".into(),
        passed: zero.is_err(),
        detail: format!("{:?}", zero.err()),
    });

    let empty = average(std::iter::empty());
    results.push(TestResult {
        name: "empty_average_invalid".into(),
        passed: !empty.is_valid(),
        detail: format!("{}", empty),
    });

    results
}
