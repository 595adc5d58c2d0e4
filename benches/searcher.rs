use flat_ordered_map::key_search::*;
use flat_ordered_map::Less;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Sizes around the default `LINEAR_SEARCH_THRESHOLD`, where linear and binary search cross
const SIZES: [usize; 7] = [4, 8, 16, 32, 64, 128, 1024];

#[inline(never)]
fn probe_all<S: KeySearch>(keys: &[usize], n: usize) {
    for i in 0..n {
        let r = S::lower_bound(keys, &black_box(i * 2), &Less);
        if i < keys.len() {
            assert_eq!(r, i);
        } else {
            assert_eq!(r, keys.len());
        }
    }
}

fn bench_key_search(c: &mut Criterion) {
    let mut g = c.benchmark_group("key_search");

    for size in SIZES {
        let keys = (0..size).map(|i| i * 2).collect::<Vec<_>>();
        let probes = size + size / 4;

        g.bench_with_input(BenchmarkId::new("linear", size), &keys, |b, keys| {
            b.iter(|| probe_all::<LinearSearch>(keys, probes));
        });

        g.bench_with_input(BenchmarkId::new("chunked_linear_4", size), &keys, |b, keys| {
            b.iter(|| probe_all::<ChunkedLinearSearch<4>>(keys, probes));
        });

        g.bench_with_input(BenchmarkId::new("binary_search", size), &keys, |b, keys| {
            b.iter(|| probe_all::<BinarySearch>(keys, probes));
        });

        g.bench_with_input(BenchmarkId::new("adaptive", size), &keys, |b, keys| {
            b.iter(|| probe_all::<Adaptive>(keys, probes));
        });
    }

    g.finish();
}

criterion_group!(benches, bench_key_search);

criterion_main!(benches);
