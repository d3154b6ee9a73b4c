//! Concurrent Cache Usage Example
//!
//! Shares one LFU cache between worker threads. Every operation takes the
//! cache-wide lock, so eviction still picks the globally least frequent key.
//!
//! Run with: cargo run --example concurrent_usage --features concurrent

use bounded_cache::concurrent::ConcurrentLfuCache;
use bounded_cache::metrics::CacheMetrics;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

const THREADS: u64 = 8;
const OPS_PER_THREAD: u64 = 10_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bounded_cache=warn".into()),
        )
        .init();

    let cap = NonZeroUsize::new(100).unwrap();
    let cache: Arc<ConcurrentLfuCache<u64, String>> = Arc::new(ConcurrentLfuCache::new(cap));

    // A small hot set that every thread keeps reading
    for hot in 0..10 {
        cache.put(hot, format!("hot-{hot}"));
    }

    let start = Instant::now();
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    if i % 2 == 0 {
                        let _ = cache.get_with(&(i % 10), |value| value.len());
                    } else {
                        let key = 1_000 + t * OPS_PER_THREAD + i;
                        cache.put(key, format!("cold-{key}"));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker thread panicked");
        }
    }
    let elapsed = start.elapsed();

    let hot_kept = (0..10).filter(|k| cache.contains(k)).count();
    println!("Concurrent LFU cache, {THREADS} threads x {OPS_PER_THREAD} ops in {elapsed:?}");
    println!("  entries:       {}/{}", cache.len(), cache.cap());
    println!("  hot keys kept: {hot_kept}/10");
    for (name, value) in cache.metrics() {
        println!("  {name:<14} {value:.3}");
    }
}
