use bilerp::grids::corner_grid::CornerGrid;
use criterion::{criterion_group, criterion_main, Criterion};

fn build_grid() -> CornerGrid<f64>
{
    CornerGrid::from_fn(|_, coordinate| coordinate[0] * coordinate[0] + coordinate[1])
}

fn run_single(c: &mut Criterion)
{
    let grid = build_grid();
    c.bench_function("interpolate", |b|b.iter(||grid.interpolate_xy(0.3, 0.7)));
}

fn run_batch(c: &mut Criterion)
{
    let grid = build_grid();
    let fractions = vec![[0.3, 0.7]; 1000];
    c.bench_function("interpolate_batch", |b|b.iter(||grid.interpolate_batch(&fractions)));
}

criterion_group!(benches, run_single, run_batch);
criterion_main!(benches);
