//! Criterion comparison of the timestamp index structures.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lookup_bench::config::DEFAULT_SPACING;
use lookup_bench::epsilon::DEFAULT_EPSILON;
use lookup_bench::store::{linear_scan, HashedIndex, IndexStore, OrderedIndex};
use lookup_bench::{ProbeTable, RandomWorkload, Workload, WorkloadSource};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn generate(size: usize) -> Workload {
    let mut workload = Workload::new();
    RandomWorkload::seeded(42, DEFAULT_SPACING).fill(size, &mut workload);
    workload
}

fn build<S: IndexStore>(workload: &Workload) -> S {
    let mut store = S::with_capacity(workload.len());
    for (key, index) in workload.pairs() {
        store.insert(key, index);
    }
    store
}

fn bench_insert_store<S: IndexStore>(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in SIZES.iter() {
        let workload = generate(*size);
        group.bench_with_input(BenchmarkId::new(S::NAME, size), size, |b, _| {
            b.iter(|| black_box(build::<S>(&workload)));
        });
    }

    group.finish();
}

fn bench_lookup_store<S: IndexStore>(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for size in SIZES.iter() {
        let workload = generate(*size);
        let store = build::<S>(&workload);

        group.bench_with_input(BenchmarkId::new(S::NAME, size), size, |b, _| {
            b.iter(|| {
                let mut sum = 0u64;
                for &key in workload.keys.iter() {
                    if let Some(v) = store.lookup(key, DEFAULT_EPSILON) {
                        sum = sum.wrapping_add(v);
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    bench_insert_store::<OrderedIndex>(c);
    bench_insert_store::<HashedIndex>(c);
    bench_insert_store::<ProbeTable>(c);
}

fn bench_lookup(c: &mut Criterion) {
    bench_lookup_store::<OrderedIndex>(c);
    bench_lookup_store::<HashedIndex>(c);
    bench_lookup_store::<ProbeTable>(c);
}

fn bench_linear_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_scan");

    // Quadratic per pass; the largest size is left out.
    for size in [1_000, 10_000].iter() {
        let workload = generate(*size);
        let probes: Vec<f64> = workload.keys.iter().step_by(100).copied().collect();

        group.bench_with_input(BenchmarkId::new("Vec<f64>", size), size, |b, _| {
            b.iter(|| {
                probes
                    .iter()
                    .filter(|&&key| linear_scan(&workload.keys, key, DEFAULT_EPSILON))
                    .count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup, bench_linear_scan);
criterion_main!(benches);
