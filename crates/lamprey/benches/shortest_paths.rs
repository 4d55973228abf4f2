use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lamprey::paths::{floyd_warshall, johnson};
use lamprey::{EdgeData, EdgeDataFactory};
use std::hint::black_box;
use std::time::Duration;

/// Ring overlay with `chords` forward shortcuts per vertex.
fn build_overlay(factory: EdgeDataFactory, size: usize, chords: usize) -> Box<dyn EdgeData> {
    let mut g = factory.create(size);
    for v in 0..size {
        let _ = g.set(v, (v + 1) % size, 1.0);
        for k in 1..=chords {
            let into = (v + k * k * 7 + 3) % size;
            if into != v {
                let _ = g.set(v, into, (k + 1) as f64);
            }
        }
    }
    g
}

fn bench_shortest_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_paths");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("ring_64_c2", 64usize, 2usize),
        ("ring_128_c3", 128usize, 3usize),
        ("ring_256_c3", 256usize, 3usize),
    ];

    for (name, size, chords) in cases {
        for factory in [EdgeDataFactory::sparse(), EdgeDataFactory::dense()] {
            let g = build_overlay(factory, size, chords);
            let backend = g.backend_name();
            group.bench_with_input(
                BenchmarkId::new(format!("floyd_warshall/{backend}"), name),
                &g,
                |b, g| {
                    b.iter(|| {
                        let routes = floyd_warshall(black_box(g.as_ref()), None);
                        black_box(routes.map(|r| r.size()).unwrap_or_default());
                    })
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("johnson/{backend}"), name),
                &g,
                |b, g| {
                    b.iter(|| {
                        let routes = johnson(black_box(g.as_ref()), None);
                        black_box(routes.map(|r| r.size()).unwrap_or_default());
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_shortest_paths);
criterion_main!(benches);
