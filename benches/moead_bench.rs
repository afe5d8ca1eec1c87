//! Criterion benchmarks for u-moead.
//!
//! Runs the full optimizer on ZDT1 and DTLZ2 to measure engine overhead,
//! plus the decomposition setup on its own.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_moead::moead::decomposition::{das_dennis, neighborhoods};
use u_moead::moead::problems::{Dtlz2, Zdt1};
use u_moead::moead::{MoeadConfig, MoeadRunner, PriorityStrategy};

fn bench_zdt1(c: &mut Criterion) {
    let mut group = c.benchmark_group("moead_zdt1");
    group.sample_size(10);

    for &n_var in &[10, 30] {
        let config = MoeadConfig::new(2, n_var)
            .with_partitions(99)
            .with_neighborhood_size(20)
            .with_max_evaluations(10_000)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n_var), &config, |b, config| {
            b.iter(|| {
                let result = MoeadRunner::run(black_box(&Zdt1), black_box(config));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_dtlz2(c: &mut Criterion) {
    let mut group = c.benchmark_group("moead_dtlz2");
    group.sample_size(10);

    for &priority in &[1.0, 0.5] {
        let problem = Dtlz2 { n_obj: 3 };
        let config = MoeadConfig::new(3, 12)
            .with_partitions(12)
            .with_neighborhood_size(20)
            .with_max_evaluations(10_000)
            .with_priority(PriorityStrategy::Fixed(priority))
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new("priority", priority),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = MoeadRunner::run(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_decomposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("decomposition");
    group.sample_size(10);

    for &(n_obj, p) in &[(2, 99), (3, 23), (5, 8)] {
        group.bench_with_input(
            BenchmarkId::new(format!("m{n_obj}"), p),
            &(n_obj, p),
            |b, &(m, p)| {
                b.iter(|| {
                    let weights = das_dennis(black_box(m), black_box(p));
                    black_box(neighborhoods(&weights, 20))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_zdt1, bench_dtlz2, bench_decomposition);
criterion_main!(benches);
