//! Search Benchmarks
//!
//! Per-generation cost of the genetic search and of its operators.
//!
//! - Sample size: 100 iterations per benchmark
//! - Confidence intervals: 95% (Criterion default)
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tourga::engine::rng::TourRng;
use tourga::ga::{cross, mutate, City, DistanceMatrix, Individual, MutationMode};
use tourga::prelude::*;

fn ring(n: usize) -> Vec<City> {
    (0..n)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / n as f64;
            City::new(angle.cos() * 100.0, angle.sin() * 100.0)
        })
        .collect()
}

fn searching(n: usize) -> SearchController {
    let mut search = SearchController::new(
        SearchConfig::builder()
            .seed(42)
            .max_generations(u64::MAX / 2)
            .max_no_improve(usize::MAX / 2)
            .build(),
    );
    search.begin_building().unwrap();
    for city in ring(n) {
        search.add_city(city).unwrap();
    }
    search.start().unwrap();
    search
}

/// One full generation (breed, evaluate, truncate) at default pop size N².
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("GA_step");
    group.sample_size(100);
    group.confidence_level(0.95);

    for n in [10, 25, 50] {
        group.bench_with_input(BenchmarkId::new("step", n), &n, |b, &n| {
            let mut search = searching(n);
            b.iter(|| black_box(search.step().unwrap().generation));
        });
    }

    group.finish();
}

/// Presence-set crossover, including the permutation checks.
fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("GA_crossover");
    group.sample_size(100);

    for n in [10, 50, 200] {
        let mut rng = TourRng::new(7);
        let parent1: Vec<usize> = (1..n).collect();
        let mut parent2 = parent1.clone();
        mutate(&mut parent2, MutationMode::Reverse, &mut rng);
        parent2.reverse();
        let cut = (n - 1) / 2;

        group.bench_with_input(BenchmarkId::new("cross", n), &n, |b, _| {
            b.iter(|| black_box(cross(&parent1, &parent2, cut).unwrap()));
        });
    }

    group.finish();
}

/// Tour evaluation against the precomputed matrix.
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("GA_evaluate");
    group.sample_size(100);

    for n in [10, 50, 200] {
        let matrix = DistanceMatrix::build(&ring(n)).unwrap();
        group.bench_with_input(BenchmarkId::new("identity", n), &n, |b, _| {
            b.iter(|| black_box(Individual::identity(&matrix).length));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_crossover, bench_evaluate);
criterion_main!(benches);
