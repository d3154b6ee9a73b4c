//! First-In-First-Out Cache Implementation.
//!
//! The FIFO cache evicts the entry that has been in the sequence the longest.
//! Reads never change the order.
//!
//! Replacing the value of a key that is already cached moves that key to the
//! back of the sequence, as if it had just been inserted:
//!
//! ```text
//!   put A, put B, put C          order: [A, B, C]   (front = next victim)
//!   put A (update)               order: [B, C, A]
//!   put D (cache full, cap 3)    evicts B
//! ```
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

/// Insertion-order tracker; the oldest key is the victim.
#[derive(Debug)]
pub struct FifoTracker<K, S = DefaultHashBuilder> {
    order: KeyOrder<K, S>,
}

impl<K, S> OrderTracker<K> for FifoTracker<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    type Hasher = S;

    const POLICY: &'static str = "FIFO";

    fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        FifoTracker {
            order: KeyOrder::with_hasher(capacity, hash_builder),
        }
    }

    #[inline]
    fn record_insert(&mut self, key: K) {
        self.order.push_back(key);
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
        self.order.pop_front()
    }

    #[inline]
    fn peek_victim(&self) -> Option<&K> {
        self.order.front()
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

/// A bounded cache that evicts the oldest inserted (or updated) key.
///
/// # Examples
///
/// ```
/// use bounded_cache::FifoCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = FifoCache::new(NonZeroUsize::new(2).unwrap());
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// // Reads do not protect "a"
/// assert_eq!(cache.get(&"a"), Some(&1));
///
/// assert_eq!(cache.put("c", 3), Some(("a", 1)));
/// ```
pub type FifoCache<K, V, S = DefaultHashBuilder> = Cache<K, V, FifoTracker<K, S>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use core::num::NonZeroUsize;

    fn make_fifo(cap: usize) -> FifoCache<&'static str, i32> {
        FifoCache::new(NonZeroUsize::new(cap).unwrap())
    }

    #[test]
    fn test_fifo_evicts_oldest() {
        let mut cache = make_fifo(2);
        assert_eq!(cache.put("a", 1), None);
        assert_eq!(cache.put("b", 2), None);
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_fifo_reads_do_not_reorder() {
        let mut cache = make_fifo(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        for _ in 0..5 {
            cache.get(&"a");
        }
        assert_eq!(cache.peek_victim(), Some(&"a"));
        assert_eq!(cache.put("d", 4).unwrap().0, "a");
    }

    #[test]
    fn test_fifo_update_moves_key_to_back() {
        let mut cache = make_fifo(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        assert_eq!(cache.put("a", 10), None);
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.put("d", 4).unwrap().0, "b");
        assert_eq!(cache.put("e", 5).unwrap().0, "c");
        assert_eq!(cache.put("f", 6).unwrap().0, "a");
    }

    #[test]
    fn test_fifo_remove_and_pop() {
        let mut cache = make_fifo(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        assert_eq!(cache.remove(&"b"), Some(2));
        assert_eq!(cache.remove(&"b"), None);
        assert_eq!(cache.pop(), Some(("a", 1)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.tracker().len(), 1);
    }

    #[test]
    fn test_fifo_init_from_config() {
        let cache: FifoCache<u32, u32> = FifoCache::init(CacheConfig::new(8), None).unwrap();
        assert_eq!(cache.cap().get(), 8);
        assert!(FifoCache::<u32, u32>::init(CacheConfig::new(0), None).is_err());
    }
}
