use cellgrid::{line_between, Cell, CellTriangle};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_line(c: &mut Criterion) {
    c.bench_function("line_between shallow 200", |b| {
        b.iter(|| {
            line_between(black_box(Cell::new(0, 0)), black_box(Cell::new(200, 67)))
                .count()
        })
    });

    c.bench_function("line_between diagonal 200", |b| {
        b.iter(|| {
            line_between(black_box(Cell::new(0, 0)), black_box(Cell::new(200, 200)))
                .count()
        })
    });
}

fn bench_triangle(c: &mut Criterion) {
    c.bench_function("triangle interior 100", |b| {
        b.iter(|| {
            let mut tri = CellTriangle::from_apex(
                black_box(Cell::new(0, 0)),
                black_box(Cell::new(100, 0)),
                30.0,
                100.0,
            )
            .unwrap();
            tri.cell_count()
        })
    });
}

criterion_group!(benches, bench_line, bench_triangle);
criterion_main!(benches);
