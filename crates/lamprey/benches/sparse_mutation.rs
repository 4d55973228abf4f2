use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lamprey::store::StoreKind;
use lamprey::{EdgeData, SparseEdges};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

/// Random `(from, into, value)` writes; about a third of them remove an edge.
fn build_ops(size: usize, count: usize, seed: u64) -> Vec<(usize, usize, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let value = if rng.random_bool(0.33) {
                0.0
            } else {
                rng.random_range(1..100) as f64
            };
            (rng.random_range(0..size), rng.random_range(0..size), value)
        })
        .collect()
}

fn bench_sparse_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_mutation");

    let cases = [
        ("n256_ops4k", 256usize, 4_000usize),
        ("n1024_ops16k", 1024usize, 16_000usize),
    ];

    for (name, size, count) in cases {
        let ops = build_ops(size, count, 7);
        for symmetric in [false, true] {
            let id = if symmetric { "symmetric" } else { "directed" };
            group.bench_with_input(BenchmarkId::new(id, name), &ops, |b, ops| {
                b.iter_batched(
                    || SparseEdges::new(size, symmetric, 0.0, StoreKind::Double),
                    |mut g| {
                        for &(from, into, value) in ops {
                            let _ = g.set(from, into, value);
                        }
                        black_box(g.non_def_count());
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        group.bench_with_input(BenchmarkId::new("compactify", name), &ops, |b, ops| {
            b.iter_batched(
                || {
                    let mut g = SparseEdges::new(size, false, 0.0, StoreKind::Double);
                    for &(from, into, value) in ops {
                        let _ = g.set(from, into, value);
                    }
                    g
                },
                |mut g| {
                    let _ = g.compactify();
                    black_box(g.non_def_count());
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sparse_mutation);
criterion_main!(benches);
