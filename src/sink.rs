//! Eviction notifications.
//!
//! A bounded cache calls its [`EvictionSink`] synchronously, exactly once for
//! every entry it evicts to stay within capacity, with the evicted key.
//! Explicit removals ([`Cache::remove`](crate::Cache::remove),
//! [`Cache::pop`](crate::Cache::pop), [`Cache::clear`](crate::Cache::clear))
//! are not evictions and are not reported.
//!
//! Any `FnMut(&K)` closure is a sink:
//!
//! ```
//! use bounded_cache::FifoCache;
//! use core::num::NonZeroUsize;
//! use std::sync::{Arc, Mutex};
//!
//! let discarded = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&discarded);
//!
//! let mut cache = FifoCache::new(NonZeroUsize::new(1).unwrap())
//!     .with_sink(move |key: &u32| log.lock().unwrap().push(*key));
//! cache.put(1, "a");
//! cache.put(2, "b");
//!
//! assert_eq!(*discarded.lock().unwrap(), [1]);
//! ```

use core::fmt;

/// Receives the key of every entry evicted for capacity.
pub trait EvictionSink<K> {
    /// Called once per eviction, after the entry has left the cache.
    fn on_evict(&mut self, key: &K);
}

impl<K, F> EvictionSink<K> for F
where
    F: FnMut(&K),
{
    #[inline]
    fn on_evict(&mut self, key: &K) {
        self(key)
    }
}

/// Logs `DISCARD: <key>` at `INFO` level through `tracing` for every
/// eviction.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl<K: fmt::Display> EvictionSink<K> for TracingSink {
    fn on_evict(&mut self, key: &K) {
        tracing::info!(target: "bounded_cache::discard", "DISCARD: {}", key);
    }
}
