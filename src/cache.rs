//! Bounded Cache Facade
//!
//! [`Cache`] composes a key/value store with an [`OrderTracker`] and enforces
//! the capacity invariant for every bounded policy. The policy-specific
//! caches ([`FifoCache`](crate::FifoCache), [`LifoCache`](crate::LifoCache),
//! [`MruCache`](crate::MruCache), [`LfuCache`](crate::LfuCache)) are type
//! aliases of this one type with a different tracker plugged in.
//!
//! # Algorithm
//!
//! ```text
//!   put(key, value)
//!     key present?  ──yes──▶ replace value, tracker.record_update(key)     (never evicts)
//!          │
//!          no
//!          ▼
//!     len >= max_items? ──yes──▶ victim = tracker.next_eviction_victim()
//!          │                     store.delete(victim), sink.on_evict(victim)
//!          ▼
//!     store.set(key, value), tracker.record_insert(key)
//!
//!   get(key)
//!     hit  ──▶ tracker.record_access(key), return &value
//!     miss ──▶ None
//! ```
//!
//! The store and the tracker are only ever mutated together, inside one
//! `&mut self` call, so they always hold the same key set.
//!
//! # Thread Safety
//!
//! `Cache` is not internally synchronized. Wrap the whole cache in one lock,
//! e.g. [`ConcurrentCache`](crate::concurrent::ConcurrentCache) behind the
//! `concurrent` feature, because the store and tracker must change atomically.

extern crate alloc;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::sink::EvictionSink;
use crate::store::Store;
use crate::tracker::OrderTracker;
use crate::DefaultHashBuilder;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::num::NonZeroUsize;
use tracing::{debug, trace};

type BoxedSink<K> = Box<dyn EvictionSink<K> + Send>;

/// Upper bound on the map slots reserved at construction. Larger caches grow
/// on demand.
const MAX_PREALLOCATED_ITEMS: usize = 1024;

/// A capacity-bounded cache whose eviction order is decided by `T`.
///
/// # Examples
///
/// ```
/// use bounded_cache::LfuCache;
/// use bounded_cache::config::CacheConfig;
///
/// let mut cache = LfuCache::init(CacheConfig { max_items: 2 }, None).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// cache.get(&"a");
/// cache.get(&"a");
/// cache.get(&"b");
///
/// // "b" has the lower frequency
/// assert_eq!(cache.put("c", 3), Some(("b", 2)));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct Cache<K, V, T: OrderTracker<K>> {
    max_items: NonZeroUsize,
    store: Store<K, V, T::Hasher>,
    tracker: T,
    sink: Option<BoxedSink<K>>,
    metrics: CoreCacheMetrics,
}

impl<K, V, T> Cache<K, V, T>
where
    K: Hash + Eq + Clone,
    T: OrderTracker<K>,
    T::Hasher: Clone,
{
    /// Creates a cache holding at most `max_items` entries with the given
    /// hash builder.
    pub fn with_hasher(max_items: NonZeroUsize, hash_builder: T::Hasher) -> Self {
        debug!(policy = T::POLICY, max_items = max_items.get(), "cache created");
        let map_capacity = max_items.get().min(MAX_PREALLOCATED_ITEMS);
        Cache {
            max_items,
            store: Store::with_capacity_and_hasher(map_capacity, hash_builder.clone()),
            tracker: T::with_hasher(map_capacity, hash_builder),
            sink: None,
            metrics: CoreCacheMetrics::new(),
        }
    }

    /// Creates a cache from `config` with a custom hash builder.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// if `config.max_items` is zero.
    pub fn init_with_hasher(config: CacheConfig, hash_builder: T::Hasher) -> Result<Self> {
        let max_items = config.validate()?;
        Ok(Self::with_hasher(max_items, hash_builder))
    }
}

impl<K, V, T> Cache<K, V, T>
where
    K: Hash + Eq + Clone,
    T: OrderTracker<K, Hasher = DefaultHashBuilder>,
{
    /// Creates a cache from `config`, using `hash_builder` or a default one.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// if `config.max_items` is zero.
    pub fn init(config: CacheConfig, hash_builder: Option<DefaultHashBuilder>) -> Result<Self> {
        Self::init_with_hasher(config, hash_builder.unwrap_or_default())
    }

    /// Creates a cache holding at most `max_items` entries.
    ///
    /// ```
    /// use bounded_cache::MruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let cache: MruCache<String, u32> = MruCache::new(NonZeroUsize::new(10).unwrap());
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(max_items: NonZeroUsize) -> Self {
        Self::with_hasher(max_items, DefaultHashBuilder::default())
    }
}

impl<K, V, T> Cache<K, V, T>
where
    K: Hash + Eq + Clone,
    T: OrderTracker<K>,
{
    /// Installs the sink notified on every capacity eviction, replacing any
    /// previous one.
    ///
    /// The sink must be `Send` so the cache stays `Send` and can move into a
    /// [`ConcurrentCache`](crate::concurrent::ConcurrentCache) or another
    /// thread. Share state with it through `Arc<Mutex<_>>` rather than
    /// `Rc<RefCell<_>>`.
    pub fn with_sink<E>(mut self, sink: E) -> Self
    where
        E: EvictionSink<K> + Send + 'static,
    {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Maximum number of entries, fixed at construction.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.max_items
    }

    /// Number of entries currently cached.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns `true` if `key` is cached. Does not count as an access.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.store.contains(key)
    }

    /// Inserts or updates `key`, returning the entry evicted to make room.
    ///
    /// Updating a key that is already cached never evicts. Inserting a new
    /// key into a full cache evicts exactly one victim chosen by the tracker
    /// and reports its key to the sink.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(slot) = self.store.get_mut(&key) {
            *slot = value;
            self.tracker.record_update(&key);
            self.metrics.record_update();
            return None;
        }

        let mut evicted = None;
        if self.store.len() >= self.max_items.get() {
            evicted = self.evict_one();
        }

        self.tracker.record_insert(key.clone());
        self.store.set(key, value);
        self.metrics.record_insertion();

        debug_assert_eq!(self.store.len(), self.tracker.len());
        evicted
    }

    /// Like [`put`](Cache::put), but silently ignores a missing key or value.
    ///
    /// ```
    /// use bounded_cache::FifoCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let mut cache = FifoCache::new(NonZeroUsize::new(2).unwrap());
    /// cache.put_optional(None, Some(1));
    /// cache.put_optional(Some("a"), None);
    /// assert!(cache.is_empty());
    ///
    /// cache.put_optional(Some("a"), Some(1));
    /// assert_eq!(cache.get(&"a"), Some(&1));
    /// ```
    pub fn put_optional(&mut self, key: Option<K>, value: Option<V>) -> Option<(K, V)> {
        match (key, value) {
            (Some(key), Some(value)) => self.put(key, value),
            _ => None,
        }
    }

    /// Returns the value for `key`, recording the access with the tracker.
    ///
    /// Reads reorder MRU and LFU caches; FIFO and LIFO caches ignore them.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.store.contains(key) {
            trace!(policy = T::POLICY, "cache miss");
            self.metrics.record_miss();
            return None;
        }
        self.tracker.record_access(key);
        self.metrics.record_hit();
        self.store.get(key)
    }

    /// Like [`get`](Cache::get), treating a missing key as "not found".
    pub fn get_optional<Q>(&mut self, key: Option<&Q>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key?)
    }

    /// Returns a mutable reference to the value for `key`, recording the
    /// access like [`get`](Cache::get).
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.store.contains(key) {
            self.metrics.record_miss();
            return None;
        }
        self.tracker.record_access(key);
        self.metrics.record_hit();
        self.store.get_mut(key)
    }

    /// Returns the value for `key` without touching eviction order or
    /// metrics.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.store.get(key)
    }

    /// The key the next capacity eviction would remove.
    #[inline]
    pub fn peek_victim(&self) -> Option<&K> {
        self.tracker.peek_victim()
    }

    /// Removes `key` from the cache. This is not an eviction and is not
    /// reported to the sink.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let value = self.store.delete(key)?;
        self.tracker.remove(key);
        self.metrics.record_removal();
        Some(value)
    }

    /// Removes and returns the current eviction candidate. Not reported to
    /// the sink.
    pub fn pop(&mut self) -> Option<(K, V)> {
        let key = self.tracker.next_eviction_victim()?;
        let value = self.store.delete(&key);
        debug_assert!(value.is_some(), "tracked key missing from the store");
        let value = value?;
        self.metrics.record_removal();
        Some((key, value))
    }

    /// Removes every entry without notifying the sink. Counters are kept.
    pub fn clear(&mut self) {
        self.store.clear();
        self.tracker.clear();
    }

    /// Iterates over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.store.iter()
    }

    /// Read access to the order tracker, e.g. for
    /// [`LfuTracker::frequency`](crate::LfuTracker::frequency).
    #[inline]
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Counters for this cache.
    #[inline]
    pub fn core_metrics(&self) -> &CoreCacheMetrics {
        &self.metrics
    }

    fn evict_one(&mut self) -> Option<(K, V)> {
        let victim = self.tracker.next_eviction_victim()?;
        let value = self.store.delete(&victim);
        debug_assert!(value.is_some(), "eviction victim missing from the store");
        let value = value?;
        self.metrics.record_eviction();
        debug!(policy = T::POLICY, len = self.store.len(), "evicted entry for capacity");
        if let Some(sink) = self.sink.as_mut() {
            sink.on_evict(&victim);
        }
        Some((victim, value))
    }
}

impl<K, V, T> CacheMetrics for Cache<K, V, T>
where
    T: OrderTracker<K>,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        T::POLICY
    }
}

impl<K, V, T> fmt::Debug for Cache<K, V, T>
where
    T: OrderTracker<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &T::POLICY)
            .field("max_items", &self.max_items)
            .field("len", &self.tracker.len())
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
