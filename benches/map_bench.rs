use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use u64_hashmap::U64HashMap;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("u64_map_insert_10k", |b| {
        b.iter_batched(
            || U64HashMap::<u64>::new(),
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(x, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("u64_map_get_hit", |b| {
        let mut m = U64HashMap::new();
        let keys: Vec<u64> = lcg(7).take(20_000).collect();
        for (i, &k) in keys.iter().enumerate() {
            m.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = *it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("u64_map_get_miss", |b| {
        let mut m = U64HashMap::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.insert(x & 0xFFFF, i as u64);
        }
        // Keys above the mask are never in the map.
        let mut miss = lcg(0xdead_beef).map(|x| x | 0x1_0000);
        b.iter(|| {
            let k = miss.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_remove_insert_churn(c: &mut Criterion) {
    c.bench_function("u64_map_churn", |b| {
        let mut m = U64HashMap::new();
        for (i, x) in lcg(13).take(10_000).enumerate() {
            m.insert(x & 0x3FFF, i as u64);
        }
        let mut it = lcg(17).map(|x| x & 0x3FFF);
        b.iter(|| {
            let k = it.next().unwrap();
            let removed = m.remove(k);
            m.insert(k, removed.unwrap_or(0));
            black_box(&m);
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("u64_map_iterate_100k", |b| {
        let mut m = U64HashMap::new();
        for (i, x) in lcg(19).take(100_000).enumerate() {
            m.insert(x, i as u64);
        }
        b.iter(|| {
            let mut acc = 0u64;
            for (k, v) in m.iter() {
                acc = acc.wrapping_add(k).wrapping_add(*v);
            }
            black_box(acc)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_remove_insert_churn, bench_iterate
}
criterion_main!(benches);
