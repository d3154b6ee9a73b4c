//! Least Frequently Used Cache Implementation.
//!
//! The LFU (Least Frequently Used) cache evicts the least frequently accessed
//! key when the cache reaches capacity. Every key starts at frequency 1; each
//! read hit and each value replacement adds one.
//!
//! Keys that share a frequency live in the same bucket, ordered by how
//! recently they reached that frequency. The victim is the front of the
//! lowest bucket, so ties are broken in favour of evicting the least recently
//! touched key:
//!
//! ```text
//!   frequency 1: [C]          ◀── victim bucket (min_frequency)
//!   frequency 2: [B, D]
//!   frequency 3: [A]
//! ```
//!
//! # Performance Characteristics
//!
//! Moving a key between buckets is O(1) list surgery plus an O(log b) bucket
//! lookup, where b is the number of distinct frequencies in use.

extern crate alloc;

use crate::cache::Cache;
use crate::list::{Entry, List};
use crate::tracker::OrderTracker;
use crate::{DefaultHashBuilder, HashMap};
use alloc::collections::BTreeMap;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};

/// Frequency and bucket node recorded for each key.
type FrequencyMetadata<K> = (usize, *mut Entry<K>);

/// Frequency tracker with LRU tie-break inside each frequency.
///
/// # Safety
///
/// `map` holds raw pointers to nodes owned by the lists in `buckets`. The
/// pointer stored with frequency `f` always refers to a node linked into
/// `buckets[f]`. A node only changes bucket inside [`bump`](LfuTracker::bump),
/// which updates the recorded frequency in the same step.
pub struct LfuTracker<K, S = DefaultHashBuilder> {
    /// Lowest frequency that currently has a bucket, or 1 when empty
    min_frequency: usize,

    map: HashMap<K, FrequencyMetadata<K>, S>,

    /// Least recently touched key at the front of each bucket
    buckets: BTreeMap<usize, List<K>>,
}

// SAFETY: LfuTracker owns every node its pointers refer to.
unsafe impl<K: Send, S: Send> Send for LfuTracker<K, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause data races.
unsafe impl<K: Sync, S: Sync> Sync for LfuTracker<K, S> {}

impl<K, S> LfuTracker<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Current access count of `key`, if tracked.
    ///
    /// ```
    /// use bounded_cache::LfuCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let mut cache = LfuCache::new(NonZeroUsize::new(4).unwrap());
    /// cache.put("a", 1);
    /// cache.get(&"a");
    /// assert_eq!(cache.tracker().frequency(&"a"), Some(2));
    /// assert_eq!(cache.tracker().frequency(&"b"), None);
    /// ```
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(|&(frequency, _)| frequency)
    }

    /// Lowest access count among tracked keys.
    #[inline]
    pub fn min_frequency(&self) -> usize {
        self.min_frequency
    }

    /// Number of non-empty frequency buckets.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Moves `key` from its bucket to the back of the next one up.
    fn bump<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(slot) = self.map.get_mut(key) else {
            return;
        };
        let (frequency, node) = *slot;
        let next = frequency + 1;

        if let Some(bucket) = self.buckets.get_mut(&frequency) {
            // SAFETY: node was recorded with `frequency`, so it lives in this bucket
            unsafe { bucket.unlink(node) };
            if bucket.is_empty() {
                self.buckets.remove(&frequency);
                if frequency == self.min_frequency {
                    self.min_frequency = next;
                }
            }
        }

        // SAFETY: node was detached above and is linked into exactly one bucket again
        unsafe { self.buckets.entry(next).or_insert_with(List::new).link_back(node) };
        slot.0 = next;
    }

    fn refresh_min_frequency(&mut self) {
        self.min_frequency = self.buckets.keys().next().copied().unwrap_or(1);
    }
}

impl<K, S> OrderTracker<K> for LfuTracker<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    type Hasher = S;

    const POLICY: &'static str = "LFU";

    fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        LfuTracker {
            min_frequency: 1,
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            buckets: BTreeMap::new(),
        }
    }

    fn record_insert(&mut self, key: K) {
        if self.map.contains_key(&key) {
            self.bump(&key);
            return;
        }
        let node = self.buckets.entry(1).or_insert_with(List::new).push_back(key.clone());
        self.map.insert(key, (1, node));
        self.min_frequency = 1;
    }

    #[inline]
    fn record_access<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bump(key);
    }

    #[inline]
    fn record_update<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bump(key);
    }

    fn next_eviction_victim(&mut self) -> Option<K> {
        let min_frequency = self.min_frequency;
        let bucket = self.buckets.get_mut(&min_frequency)?;
        let key = bucket.pop_front()?;
        if bucket.is_empty() {
            self.buckets.remove(&min_frequency);
            self.refresh_min_frequency();
        }
        self.map.remove(&key);
        Some(key)
    }

    fn peek_victim(&self) -> Option<&K> {
        self.buckets.get(&self.min_frequency)?.front()
    }

    fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some((frequency, node)) = self.map.remove(key) else {
            return false;
        };
        if let Some(bucket) = self.buckets.get_mut(&frequency) {
            // SAFETY: node was recorded with `frequency` and its map entry is gone
            unsafe { bucket.remove(node) };
            if bucket.is_empty() {
                self.buckets.remove(&frequency);
                if frequency == self.min_frequency {
                    self.refresh_min_frequency();
                }
            }
        }
        true
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.buckets.clear();
        self.min_frequency = 1;
    }
}

impl<K, S> fmt::Debug for LfuTracker<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuTracker")
            .field("len", &self.map.len())
            .field("min_frequency", &self.min_frequency)
            .field("buckets", &self.buckets.len())
            .finish()
    }
}

/// A bounded cache that evicts the least frequently used key, breaking ties
/// by evicting the least recently touched one.
///
/// # Examples
///
/// ```
/// use bounded_cache::LfuCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// // Same frequency: "a" was touched least recently
/// assert_eq!(cache.put("c", 3), Some(("a", 1)));
/// ```
pub type LfuCache<K, V, S = DefaultHashBuilder> = Cache<K, V, LfuTracker<K, S>>;
