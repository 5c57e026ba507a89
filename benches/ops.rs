use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::seq::SliceRandom;

use bst_index::{Bst, Strategy};

criterion_group!(benches, bench_set, bench_get, bench_iter);
criterion_main!(benches);

const STRATEGIES: [(&str, Strategy); 3] = [
    ("unbalanced", Strategy::Unbalanced),
    ("avl", Strategy::Avl),
    ("rb", Strategy::RedBlack),
];

fn shuffled_keys(n: u64) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n).collect();
    keys.shuffle(&mut rand::thread_rng());
    keys
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("Set");
    for (label, strategy) in STRATEGIES.iter() {
        for n in [1_000_u64, 10_000].iter() {
            let keys = shuffled_keys(*n);
            group.bench_function(BenchmarkId::new(*label, n), |b| {
                b.iter(|| {
                    let mut index: Bst<u64, u64> = Bst::new("bench-set", *strategy);
                    for key in keys.iter() {
                        index.set(*key, *key);
                    }
                    index.len()
                })
            });
        }
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("Get");
    for (label, strategy) in STRATEGIES.iter() {
        for n in [1_000_u64, 10_000].iter() {
            let keys = shuffled_keys(*n);
            let index: Bst<u64, u64> =
                Bst::load_from("bench-get", *strategy, keys.iter().map(|key| (*key, *key)));
            group.bench_function(BenchmarkId::new(*label, n), |b| {
                b.iter(|| {
                    for key in keys.iter() {
                        assert!(index.get(key).is_ok());
                    }
                })
            });
        }
    }
    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("Iter");
    for (label, strategy) in STRATEGIES.iter() {
        for n in [1_000_u64, 10_000].iter() {
            let keys = shuffled_keys(*n);
            let index: Bst<u64, u64> =
                Bst::load_from("bench-iter", *strategy, keys.iter().map(|key| (*key, *key)));
            group.bench_function(BenchmarkId::new(*label, n), |b| {
                b.iter(|| index.iter().count())
            });
        }
    }
    group.finish();
}
