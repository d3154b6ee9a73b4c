//! Thread-safe cache wrapper.
//!
//! [`ConcurrentCache`] puts a whole [`Cache`] behind one `parking_lot::Mutex`.
//! Every operation, reads included, takes the lock: a read may reorder the
//! tracker (MRU, LFU), and the store and tracker must always change together.
//!
//! The cache is not sharded: there is one eviction order for the whole key
//! set, so the victim on a full cache is always the global one.
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │        ConcurrentCache<K, V, T>    │
//! │  ┌──────────────────────────────┐  │
//! │  │            Mutex             │  │
//! │  │  ┌────────────────────────┐  │  │
//! │  │  │ Cache: Store + Tracker │  │  │
//! │  │  └────────────────────────┘  │  │
//! │  └──────────────────────────────┘  │
//! └────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use bounded_cache::concurrent::ConcurrentLfuCache;
//! use core::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLfuCache::new(NonZeroUsize::new(64).unwrap()));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100u32 {
//!                 cache.put(t * 1000 + i, i);
//!                 let _ = cache.get(&(t * 1000 + i));
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 64);
//! ```
//!
//! For values that are expensive to clone, [`ConcurrentCache::get_with`]
//! runs a closure on the value while the lock is held.

extern crate alloc;

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::fifo::FifoTracker;
use crate::lfu::LfuTracker;
use crate::lifo::LifoTracker;
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::mru::MruTracker;
use crate::sink::EvictionSink;
use crate::tracker::OrderTracker;
use crate::DefaultHashBuilder;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::num::NonZeroUsize;
use parking_lot::Mutex;

/// A [`Cache`] that can be shared across threads, e.g. through an `Arc`.
pub struct ConcurrentCache<K, V, T: OrderTracker<K>> {
    inner: Mutex<Cache<K, V, T>>,
}

/// Thread-safe [`FifoCache`](crate::FifoCache).
pub type ConcurrentFifoCache<K, V, S = DefaultHashBuilder> =
    ConcurrentCache<K, V, FifoTracker<K, S>>;

/// Thread-safe [`LifoCache`](crate::LifoCache).
pub type ConcurrentLifoCache<K, V, S = DefaultHashBuilder> =
    ConcurrentCache<K, V, LifoTracker<K, S>>;

/// Thread-safe [`MruCache`](crate::MruCache).
pub type ConcurrentMruCache<K, V, S = DefaultHashBuilder> = ConcurrentCache<K, V, MruTracker<K, S>>;

/// Thread-safe [`LfuCache`](crate::LfuCache).
pub type ConcurrentLfuCache<K, V, S = DefaultHashBuilder> = ConcurrentCache<K, V, LfuTracker<K, S>>;

impl<K, V, T> ConcurrentCache<K, V, T>
where
    K: Hash + Eq + Clone,
    T: OrderTracker<K, Hasher = DefaultHashBuilder>,
{
    /// Creates a cache holding at most `max_items` entries.
    pub fn new(max_items: NonZeroUsize) -> Self {
        Self::from(Cache::new(max_items))
    }

    /// Creates a cache from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// if `config.max_items` is zero.
    pub fn init(config: CacheConfig, hash_builder: Option<DefaultHashBuilder>) -> Result<Self> {
        Cache::init(config, hash_builder).map(Self::from)
    }
}

impl<K, V, T> ConcurrentCache<K, V, T>
where
    K: Hash + Eq + Clone,
    T: OrderTracker<K>,
{
    /// Installs the eviction sink. The sink runs while the lock is held, so
    /// it must not call back into this cache. It must be `Send` because
    /// evictions happen on whichever thread holds the lock.
    pub fn with_sink<E>(self, sink: E) -> Self
    where
        E: EvictionSink<K> + Send + 'static,
    {
        Self::from(self.into_inner().with_sink(sink))
    }

    /// Maximum number of entries, fixed at construction.
    pub fn cap(&self) -> NonZeroUsize {
        self.inner.lock().cap()
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Inserts or updates `key`, returning the entry evicted to make room.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().put(key, value)
    }

    /// Like [`put`](ConcurrentCache::put), but silently ignores a missing key
    /// or value.
    pub fn put_optional(&self, key: Option<K>, value: Option<V>) -> Option<(K, V)> {
        self.inner.lock().put_optional(key, value)
    }

    /// Gets a value from the cache.
    ///
    /// This clones the value to avoid holding the lock. For zero-copy access,
    /// use `get_with()` instead.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Gets a value and applies `f` to it while holding the lock. Counts as
    /// an access, like [`get`](ConcurrentCache::get).
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Applies `f` to the value for `key` without touching eviction order.
    pub fn peek_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().peek(key).map(f)
    }

    /// Removes `key`. Not reported to the sink.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Removes and returns the current eviction candidate.
    pub fn pop(&self) -> Option<(K, V)> {
        self.inner.lock().pop()
    }

    /// Returns `true` if `key` is cached.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Snapshot of the counters.
    pub fn core_metrics(&self) -> CoreCacheMetrics {
        self.inner.lock().core_metrics().clone()
    }

    /// Runs `f` with exclusive access to the underlying cache, for sequences
    /// of operations that must not interleave with other threads.
    ///
    /// ```
    /// use bounded_cache::concurrent::ConcurrentFifoCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let cache: ConcurrentFifoCache<&str, i32> =
    ///     ConcurrentFifoCache::new(NonZeroUsize::new(4).unwrap());
    /// let inserted = cache.with_lock(|cache| {
    ///     if cache.contains(&"a") {
    ///         false
    ///     } else {
    ///         cache.put("a", 1);
    ///         true
    ///     }
    /// });
    /// assert!(inserted);
    /// ```
    pub fn with_lock<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cache<K, V, T>) -> R,
    {
        f(&mut self.inner.lock())
    }

    /// Unwraps the underlying single-threaded cache.
    pub fn into_inner(self) -> Cache<K, V, T> {
        self.inner.into_inner()
    }
}

impl<K, V, T: OrderTracker<K>> From<Cache<K, V, T>> for ConcurrentCache<K, V, T> {
    fn from(cache: Cache<K, V, T>) -> Self {
        ConcurrentCache {
            inner: Mutex::new(cache),
        }
    }
}

impl<K, V, T: OrderTracker<K>> CacheMetrics for ConcurrentCache<K, V, T> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        T::POLICY
    }
}

impl<K, V, T: OrderTracker<K>> fmt::Debug for ConcurrentCache<K, V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f.debug_struct("ConcurrentCache").field("inner", &*cache).finish(),
            None => f
                .debug_struct("ConcurrentCache")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate std;
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_concurrent_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConcurrentFifoCache<u64, u64>>();
        assert_send_sync::<ConcurrentLifoCache<u64, u64>>();
        assert_send_sync::<ConcurrentMruCache<u64, u64>>();
        assert_send_sync::<ConcurrentLfuCache<u64, u64>>();
    }

    #[test]
    fn test_concurrent_keeps_global_order() {
        let cache = ConcurrentFifoCache::new(cap(2));
        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.get(&1), Some("a"));
        assert_eq!(cache.put(3, "c"), Some((1, "a")));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_get_with_and_peek_with() {
        let cache = ConcurrentMruCache::new(cap(2));
        cache.put(1, 10);
        cache.put(2, 20);

        assert_eq!(cache.peek_with(&1, |v| *v + 1), Some(11));
        assert_eq!(cache.with_lock(|c| c.peek_victim().copied()), Some(2));

        assert_eq!(cache.get_with(&1, |v| *v * 2), Some(20));
        assert_eq!(cache.with_lock(|c| c.peek_victim().copied()), Some(1));
    }

    #[test]
    fn test_concurrent_threads_respect_capacity() {
        let cache = Arc::new(ConcurrentLfuCache::new(cap(32)));
        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500u64 {
                        let key = t * 10_000 + i;
                        cache.put(key, i);
                        let _ = cache.get(&key);
                        assert!(cache.len() <= 32);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 32);
        let metrics = cache.core_metrics();
        assert_eq!(metrics.insertions, 8 * 500);
        assert_eq!(metrics.evictions, 8 * 500 - 32);
    }

    #[test]
    fn test_concurrent_sink_and_into_inner() {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&evicted);
        let cache = ConcurrentLifoCache::new(cap(1)).with_sink(move |key: &u32| log.lock().push(*key));

        cache.put(1, ());
        cache.put(2, ());
        cache.put(3, ());
        assert_eq!(*evicted.lock(), [1, 2]);

        let inner = cache.into_inner();
        assert_eq!(inner.len(), 1);
        assert!(inner.contains(&3));
    }
}
