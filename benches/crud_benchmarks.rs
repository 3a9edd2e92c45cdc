use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use skipset::SkipSet;
use std::collections::BTreeSet;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    for (name, keys) in [("ordered", ordered_keys(N)), ("random", random_keys(N))] {
        let mut group = c.benchmark_group(format!("insert_{name}"));

        group.bench_function(BenchmarkId::new("SkipSet", N), |b| {
            b.iter(|| {
                let mut set = SkipSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.finish();
    }
}

// ─── Lookups ────────────────────────────────────────────────────────────────

fn bench_contains_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let skip: SkipSet<i64> = keys.iter().copied().collect();
    let bt: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("contains_random");

    group.bench_function(BenchmarkId::new("SkipSet", N), |b| {
        b.iter(|| keys.iter().filter(|&k| skip.contains(k)).count());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().filter(|&k| bt.contains(k)).count());
    });

    group.finish();
}

fn bench_neighbors_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let probes: Vec<i64> = keys.iter().map(|k| k + 1).collect();
    let skip: SkipSet<i64> = keys.iter().copied().collect();
    let bt: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("floor_ceiling_random");

    group.bench_function(BenchmarkId::new("SkipSet", N), |b| {
        b.iter(|| {
            for p in &probes {
                black_box(skip.floor(p));
                black_box(skip.ceiling(p));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            for p in &probes {
                black_box(bt.range(..=p).next_back());
                black_box(bt.range(p..).next());
            }
        });
    });

    group.finish();
}

fn bench_find_index(c: &mut Criterion) {
    let skip: SkipSet<i64> = random_keys(N).into_iter().collect();
    let indices: Vec<usize> = (0..skip.len()).step_by(7).collect();

    let mut group = c.benchmark_group("find_index");

    group.bench_function(BenchmarkId::new("SkipSet", N), |b| {
        b.iter(|| indices.iter().filter_map(|&i| skip.find_index(i)).count());
    });

    group.finish();
}

// Lazy level growth versus an explicit rebuild after bulk loading into a one-level set.
fn bench_contains_after_growth(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut lazy: SkipSet<i64> = SkipSet::builder().levels(1).build();
    lazy.extend(&keys);
    let mut rebuilt = lazy.clone();
    rebuilt.rebuild();

    let mut group = c.benchmark_group("contains_after_growth");

    group.bench_function(BenchmarkId::new("lazy", N), |b| {
        b.iter(|| keys.iter().filter(|&k| lazy.contains(k)).count());
    });

    group.bench_function(BenchmarkId::new("rebuilt", N), |b| {
        b.iter(|| keys.iter().filter(|&k| rebuilt.contains(k)).count());
    });

    group.finish();
}

// ─── Remove ─────────────────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("SkipSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<SkipSet<i64>>(),
            |mut set| {
                for k in &keys {
                    set.remove(k);
                }
                set
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| {
                for k in &keys {
                    set.remove(k);
                }
                set
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert);

criterion_group!(
    lookup_benches,
    bench_contains_random,
    bench_neighbors_random,
    bench_find_index,
    bench_contains_after_growth,
);

criterion_group!(remove_benches, bench_remove_random);

criterion_main!(insert_benches, lookup_benches, remove_benches);
