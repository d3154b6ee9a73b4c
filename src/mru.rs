//! Most Recently Used Cache Implementation.
//!
//! The MRU cache evicts the key that was touched last, where both a read hit
//! and a value replacement count as a touch. It is the mirror image of LRU
//! and performs well on cyclic scans that are slightly larger than the cache,
//! where the entry just used is the one least likely to be needed again soon.
//!
//! # Performance Characteristics
//!
//! | Operation | Time |
//! |-----------|------|
//! | Get       | O(1) |
//! | Put       | O(1) |
//! | Remove    | O(1) |

use crate::cache::Cache;
use crate::tracker::{KeyOrder, OrderTracker};
use crate::DefaultHashBuilder;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

/// Recency tracker; the most recently touched key is the victim.
#[derive(Debug)]
pub struct MruTracker<K, S = DefaultHashBuilder> {
    order: KeyOrder<K, S>,
}

impl<K, S> OrderTracker<K> for MruTracker<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    type Hasher = S;

    const POLICY: &'static str = "MRU";

    fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        MruTracker {
            order: KeyOrder::with_hasher(capacity, hash_builder),
        }
    }

    #[inline]
    fn record_insert(&mut self, key: K) {
        self.order.push_back(key);
    }

    #[inline]
    fn record_access<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.order.move_to_back(key);
    }

    #[inline]
    fn record_update<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.order.move_to_back(key);
    }

    #[inline]
    fn next_eviction_victim(&mut self) -> Option<K> {
        self.order.pop_back()
    }

    #[inline]
    fn peek_victim(&self) -> Option<&K> {
        self.order.back()
    }

    #[inline]
    fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.order.remove(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.order.len()
    }

    fn clear(&mut self) {
        self.order.clear();
    }
}

/// A bounded cache that evicts the most recently used key.
///
/// # Examples
///
/// ```
/// use bounded_cache::MruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = MruCache::new(NonZeroUsize::new(2).unwrap());
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// // "a" becomes the most recently used key
/// cache.get(&"a");
///
/// assert_eq!(cache.put("c", 3), Some(("a", 1)));
/// ```
pub type MruCache<K, V, S = DefaultHashBuilder> = Cache<K, V, MruTracker<K, S>>;
