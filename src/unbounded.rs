//! Unbounded cache.
//!
//! [`UnboundedCache`] is a plain key/value store behind the same `put`/`get`
//! contract as the bounded caches. It keeps no eviction order and never
//! evicts, so its size is limited only by available memory.

extern crate alloc;

use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::store::Store;
use crate::DefaultHashBuilder;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use tracing::{debug, trace};

/// A cache without a capacity limit.
///
/// # Examples
///
/// ```
/// use bounded_cache::UnboundedCache;
///
/// let mut cache = UnboundedCache::new();
/// for i in 0..1_000 {
///     cache.put(i, i * 2);
/// }
/// assert_eq!(cache.len(), 1_000);
/// assert_eq!(cache.get(&0), Some(&0));
/// ```
pub struct UnboundedCache<K, V, S = DefaultHashBuilder> {
    store: Store<K, V, S>,
    metrics: CoreCacheMetrics,
}

impl<K: Hash + Eq, V> UnboundedCache<K, V, DefaultHashBuilder> {
    /// Creates an empty cache with the default hash builder.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V> Default for UnboundedCache<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> UnboundedCache<K, V, S> {
    /// Creates an empty cache using `hash_builder` for its map.
    pub fn with_hasher(hash_builder: S) -> Self {
        debug!(policy = "UNBOUNDED", "cache created");
        UnboundedCache {
            store: Store::with_capacity_and_hasher(0, hash_builder),
            metrics: CoreCacheMetrics::new(),
        }
    }

    /// Inserts or replaces the value for `key`, returning the previous value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.store.set(key, value);
        if previous.is_some() {
            self.metrics.record_update();
        } else {
            self.metrics.record_insertion();
        }
        previous
    }

    /// Like [`put`](UnboundedCache::put), but silently ignores a missing key
    /// or value.
    pub fn put_optional(&mut self, key: Option<K>, value: Option<V>) -> Option<V> {
        match (key, value) {
            (Some(key), Some(value)) => self.put(key, value),
            _ => None,
        }
    }

    /// Returns the value for `key`, counting a hit or a miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let value = self.store.get(key);
        if value.is_some() {
            self.metrics.record_hit();
        } else {
            trace!(policy = "UNBOUNDED", "cache miss");
            self.metrics.record_miss();
        }
        value
    }

    /// Like [`get`](UnboundedCache::get), treating a missing key as "not found".
    pub fn get_optional<Q>(&mut self, key: Option<&Q>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key?)
    }

    /// Mutable variant of [`get`](UnboundedCache::get).
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let value = self.store.get_mut(key);
        if value.is_some() {
            self.metrics.record_hit();
        } else {
            self.metrics.record_miss();
        }
        value
    }

    /// Returns the value for `key` without counting a request.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.store.get(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let value = self.store.delete(key)?;
        self.metrics.record_removal();
        Some(value)
    }

    /// Returns `true` if `key` is cached.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.store.contains(key)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Iterates over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.store.iter()
    }

    /// Counters for this cache.
    #[inline]
    pub fn core_metrics(&self) -> &CoreCacheMetrics {
        &self.metrics
    }
}

impl<K, V, S> CacheMetrics for UnboundedCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "UNBOUNDED"
    }
}

impl<K, V, S> fmt::Debug for UnboundedCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnboundedCache")
            .field("insertions", &self.metrics.insertions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_never_evicts() {
        let mut cache = UnboundedCache::new();
        for i in 0..10_000u32 {
            assert_eq!(cache.put(i, i), None);
        }
        assert_eq!(cache.len(), 10_000);
        assert!((0..10_000u32).all(|i| cache.contains(&i)));
        assert_eq!(cache.core_metrics().evictions, 0);
    }

    #[test]
    fn test_unbounded_put_replaces_value() {
        let mut cache = UnboundedCache::new();
        cache.put("a", 1);
        assert_eq!(cache.put("a", 2), Some(1));
        assert_eq!(cache.get(&"a"), Some(&2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.core_metrics().updates, 1);
    }

    #[test]
    fn test_unbounded_optional_arguments_are_ignored() {
        let mut cache: UnboundedCache<&str, i32> = UnboundedCache::new();
        cache.put_optional(None, Some(1));
        cache.put_optional(Some("a"), None);
        cache.put_optional(None, None);
        assert!(cache.is_empty());

        assert_eq!(cache.get_optional(None::<&&str>), None);
        cache.put_optional(Some("a"), Some(1));
        assert_eq!(cache.get_optional(Some(&"a")), Some(&1));
    }

    #[test]
    fn test_unbounded_remove_and_clear() {
        let mut cache = UnboundedCache::new();
        cache.put(1, "one");
        cache.put(2, "two");
        assert_eq!(cache.remove(&1), Some("one"));
        assert_eq!(cache.remove(&1), None);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.algorithm_name(), "UNBOUNDED");
    }
}
