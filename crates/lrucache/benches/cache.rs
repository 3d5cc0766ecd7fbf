use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lrucache::{BlockingLruCache, LruCache};

const CAPACITY: u64 = 10_000;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let cache = LruCache::new(CAPACITY as usize).unwrap();
        for i in 0..CAPACITY {
            cache.put(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % CAPACITY)));
            counter += 1;
        });
    });

    group.bench_function("get_hit_blocking", |b| {
        let cache = BlockingLruCache::new(CAPACITY as usize).unwrap();
        for i in 0..CAPACITY {
            cache.put(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % CAPACITY)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_put_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_evicting", |b| {
        let cache = LruCache::new(1000).unwrap();

        // Every key is new, so each put past the first 1000 evicts
        let mut counter = 0u64;
        b.iter(|| {
            cache.put(black_box(counter), counter);
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let cache = LruCache::new(CAPACITY as usize).unwrap();
        for i in 0..CAPACITY {
            cache.put(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter % 2 == 0 {
                cache.put(counter % CAPACITY, counter);
            } else {
                black_box(cache.get(&(counter % CAPACITY)));
            }
            counter += 1;
        });
    });

    group.bench_function("50_read_50_write_2_threads", |b| {
        let cache = Arc::new(LruCache::new(CAPACITY as usize).unwrap());
        for i in 0..CAPACITY {
            cache.put(i, i);
        }

        b.iter(|| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let cache = Arc::clone(&cache);
                    thread::spawn(move || {
                        for i in 0..1000u64 {
                            if i % 2 == 0 {
                                cache.put(i % CAPACITY, i);
                            } else {
                                black_box(cache.get(&(i % CAPACITY)));
                            }
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_put_evicting,
    bench_mixed_50_50
);
criterion_main!(benches);
