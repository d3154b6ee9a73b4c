use bounded_cache::config::CacheConfig;
use bounded_cache::{
    Cache, DefaultHashBuilder, FifoTracker, LfuTracker, LifoTracker, MruTracker, OrderTracker,
    UnboundedCache,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkGroup, Criterion};
use criterion::measurement::WallTime;

const CACHE_SIZE: usize = 1000;

// Helper to create any bounded cache with the init pattern
fn make_cache<T>(cap: usize) -> Cache<usize, usize, T>
where
    T: OrderTracker<usize, Hasher = DefaultHashBuilder>,
{
    Cache::init(CacheConfig { max_items: cap }, None).unwrap()
}

fn bench_policy<T>(group: &mut BenchmarkGroup<'_, WallTime>, name: &str)
where
    T: OrderTracker<usize, Hasher = DefaultHashBuilder>,
{
    let mut cache = make_cache::<T>(CACHE_SIZE);
    for i in 0..CACHE_SIZE {
        cache.put(i, i);
    }

    group.bench_function(format!("{name} get hit"), |b| {
        b.iter(|| {
            for i in 0..100 {
                black_box(cache.get(&(i % CACHE_SIZE)));
            }
        });
    });

    group.bench_function(format!("{name} get miss"), |b| {
        b.iter(|| {
            for i in 0..100 {
                black_box(cache.get(&(i + CACHE_SIZE)));
            }
        });
    });

    group.bench_function(format!("{name} put existing"), |b| {
        b.iter(|| {
            for i in 0..100 {
                black_box(cache.put(i % CACHE_SIZE, i));
            }
        });
    });

    // Every put of a fresh key evicts once the cache is full
    let mut next = CACHE_SIZE;
    group.bench_function(format!("{name} put evicting"), |b| {
        b.iter(|| {
            for _ in 0..100 {
                black_box(cache.put(next, next));
                next += 1;
            }
        });
    });
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cache Operations");

    bench_policy::<FifoTracker<usize>>(&mut group, "FIFO");
    bench_policy::<LifoTracker<usize>>(&mut group, "LIFO");
    bench_policy::<MruTracker<usize>>(&mut group, "MRU");
    bench_policy::<LfuTracker<usize>>(&mut group, "LFU");

    // Unbounded baseline
    {
        let mut cache = UnboundedCache::new();
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("UNBOUNDED get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("UNBOUNDED put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.put(i % CACHE_SIZE, i));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
