//! Micro-benchmarks for the statistical-update pipeline.
//!
//! Every slider event runs draw → mean/sem → significance synchronously, so
//! the whole path has to stay cheap at the top of the slider range.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sampling_explorer::config::EngineConfig;
use sampling_explorer::engine::EngineState;
use sampling_explorer::population::Population;
use sampling_explorer::significance::compute_significance;

fn bench_set_group_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_group_size");

    let mut rng = StdRng::seed_from_u64(99);
    let population = Arc::new(Population::generate_with(&mut rng, 2.0, 1.0, 1000).unwrap());
    let state =
        EngineState::initialize_with(&mut rng, population, EngineConfig::default()).unwrap();

    for size in [10, 50, 100] {
        group.bench_with_input(BenchmarkId::new("comparison_group", size), &size, |b, &n| {
            let mut rng = StdRng::seed_from_u64(7);
            // Alternate between two sizes so no iteration hits the no-op path
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let n = if flip { n } else { n - 1 };
                black_box(state.set_group_size_with(&mut rng, 0, n).unwrap())
            });
        });

        group.bench_with_input(BenchmarkId::new("reference_group", size), &size, |b, &n| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let n = if flip { n } else { n - 1 };
                black_box(state.set_group_size_with(&mut rng, 4, n).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_compute_significance(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_significance");

    let mut rng = StdRng::seed_from_u64(5);
    let population = Population::generate_with(&mut rng, 2.0, 1.0, 1000).unwrap();

    for size in [10, 50, 100] {
        let a = population.draw_with(&mut rng, size).unwrap();
        let b_sample = population.draw_with(&mut rng, size).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(compute_significance(&a, &b_sample).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_set_group_size, bench_compute_significance);
criterion_main!(benches);
