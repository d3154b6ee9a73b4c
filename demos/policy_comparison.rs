//! Eviction Policy Comparison
//!
//! Runs the same access sequence against every policy and prints which key
//! each one discards. Evictions are also logged as `DISCARD: <key>` through
//! `tracing`.
//!
//! Run with: cargo run --example policy_comparison
//! Set `RUST_LOG=bounded_cache=debug` to see cache creation and eviction events.

use bounded_cache::config::CacheConfig;
use bounded_cache::metrics::CacheMetrics;
use bounded_cache::{
    Cache, DefaultHashBuilder, FifoTracker, LfuTracker, LifoTracker, MruTracker, OrderTracker,
    TracingSink, UnboundedCache,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn run_scenario<T>(label: &str)
where
    T: OrderTracker<&'static str, Hasher = DefaultHashBuilder>,
{
    let config = CacheConfig { max_items: 3 };
    let mut cache: Cache<&'static str, u32, T> = match Cache::init(config, None) {
        Ok(cache) => cache.with_sink(TracingSink),
        Err(err) => {
            eprintln!("{label}: {err}");
            return;
        }
    };

    cache.put("apple", 1);
    cache.put("banana", 2);
    cache.put("cherry", 3);

    // apple is read three times, cherry once
    for _ in 0..3 {
        cache.get(&"apple");
    }
    cache.get(&"cherry");

    let evicted = cache.put("date", 4).map(|(key, _)| key);
    let second = cache.put("elderberry", 5).map(|(key, _)| key);

    let mut remaining: Vec<_> = cache.iter().map(|(key, _)| *key).collect();
    remaining.sort_unstable();

    println!(
        "{:<5} evicted {:<8} then {:<8} remaining {:?}",
        cache.algorithm_name(),
        evicted.unwrap_or("-"),
        second.unwrap_or("-"),
        remaining
    );
    println!("      metrics: {:?}", cache.metrics());
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bounded_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Eviction Policy Comparison");
    println!("==========================");
    println!("Each cache holds 3 items. We add apple, banana and cherry, read apple");
    println!("three times and cherry once, then add date and elderberry.\n");

    run_scenario::<FifoTracker<&'static str>>("FIFO");
    run_scenario::<LifoTracker<&'static str>>("LIFO");
    run_scenario::<MruTracker<&'static str>>("MRU");
    run_scenario::<LfuTracker<&'static str>>("LFU");

    let mut unbounded = UnboundedCache::new();
    for (i, key) in ["apple", "banana", "cherry", "date", "elderberry"]
        .into_iter()
        .enumerate()
    {
        unbounded.put(key, i);
    }
    println!(
        "{:<5} evicted nothing, {} entries kept",
        unbounded.algorithm_name(),
        unbounded.len()
    );

    // Invalid configuration is reported, not silently accepted
    if let Err(err) = bounded_cache::FifoCache::<u32, u32>::init(CacheConfig { max_items: 0 }, None) {
        println!("\nmax_items = 0 rejected: {err}");
    }
}
