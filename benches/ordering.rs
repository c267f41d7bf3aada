//! Benchmarks for data source ordering.
//!
//! `order` makes repeated passes over the pending entries, so the worst
//! case is a chain declared in reverse: each pass emits one entry.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use viewtree::phases::ordering::{order, DependencyList};

/// `ds-0` depends on `ds-1`, which depends on `ds-2`, and so on.
fn reversed_chain(len: usize) -> DependencyList {
    (0..len)
        .map(|i| {
            let deps = if i + 1 < len {
                vec![format!("ds-{}", i + 1)]
            } else {
                Vec::new()
            };
            (format!("ds-{}", i), deps)
        })
        .collect()
}

/// Every entry depends on the next, and the last on the first.
fn cycle(len: usize) -> DependencyList {
    (0..len)
        .map(|i| (format!("ds-{}", i), vec![format!("ds-{}", (i + 1) % len)]))
        .collect()
}

/// Independent entries; a single pass suffices.
fn independent(len: usize) -> DependencyList {
    (0..len).map(|i| (format!("ds-{}", i), Vec::new())).collect()
}

fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering");

    for len in [4, 16, 64] {
        let chain = reversed_chain(len);
        group.bench_with_input(BenchmarkId::new("reversed_chain", len), &chain, |b, entries| {
            b.iter(|| order(black_box(entries)))
        });

        let cyclic = cycle(len);
        group.bench_with_input(BenchmarkId::new("cycle", len), &cyclic, |b, entries| {
            b.iter(|| order(black_box(entries)))
        });

        let flat = independent(len);
        group.bench_with_input(BenchmarkId::new("independent", len), &flat, |b, entries| {
            b.iter(|| order(black_box(entries)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ordering);
criterion_main!(benches);
