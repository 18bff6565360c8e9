//! Criterion benchmarks comparing the three multiply strategies.
//!
//! Run with `cargo bench`. Sizes straddle the default tile (16) so the
//! clipped boundary tiles are part of what gets measured.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use matmul_engine::{
    BlockedMultiply, Element, Matrix, Multiply, NaiveMultiply, ParallelMultiply,
    threaded::available_workers,
};

fn operands(n: usize) -> (Matrix, Matrix) {
    let a = Matrix::from_fn(n, |i, j| ((i * n + j) % 100) as Element);
    let b = Matrix::from_fn(n, |i, j| ((i + j) % 100) as Element);
    (a, b)
}

fn bench_strategies(c: &mut Criterion) {
    let workers = available_workers().unwrap_or(1);
    let engines: Vec<Box<dyn Multiply>> = vec![
        Box::new(NaiveMultiply::new()),
        Box::new(BlockedMultiply::default()),
        Box::new(ParallelMultiply::new(workers).expect("thread pool")),
    ];

    let mut group = c.benchmark_group("multiply");
    group.sample_size(10);

    for n in [63, 128, 257] {
        let (a, b) = operands(n);
        for engine in &engines {
            group.bench_with_input(BenchmarkId::new(engine.name(), n), &n, |bench, _| {
                bench.iter(|| engine.multiply(black_box(&a), black_box(&b)).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_tile_sizes(c: &mut Criterion) {
    let n = 256;
    let (a, b) = operands(n);
    let mut group = c.benchmark_group("blocked_tile");
    group.sample_size(10);

    for tile in [4, 8, 16, 32, 64] {
        let engine = BlockedMultiply::new(tile).expect("positive tile");
        group.bench_with_input(BenchmarkId::from_parameter(tile), &tile, |bench, _| {
            bench.iter(|| engine.multiply(black_box(&a), black_box(&b)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_tile_sizes);
criterion_main!(benches);
