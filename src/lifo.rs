//! Last-In-First-Out Cache Implementation.
//!
//! The LIFO cache evicts the entry that joined the sequence most recently, so
//! the oldest entries are never displaced by newcomers. This suits workloads
//! where the earliest keys are the valuable ones, such as a warm-up set that
//! should survive a burst of one-off lookups.
//!
//! Like FIFO, reads never change the order, and replacing the value of a
//! cached key moves it to the back of the sequence, which makes it the next
//! victim:
//!
//! ```text
//!   put A, put B                 order: [A, B]   (back = next victim)
//!   put A (update)               order: [B, A]
//!   put C (cache full, cap 2)    evicts A
//! ```

use crate::cache::Cache;
use crate::tracker::{KeyOrder, OrderTracker};
use crate::DefaultHashBuilder;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

/// Insertion-order tracker; the newest key is the victim.
#[derive(Debug)]
pub struct LifoTracker<K, S = DefaultHashBuilder> {
    order: KeyOrder<K, S>,
}

impl<K, S> OrderTracker<K> for LifoTracker<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    type Hasher = S;

    const POLICY: &'static str = "LIFO";

    fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        LifoTracker {
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

/// A bounded cache that evicts the most recently inserted (or updated) key.
///
/// # Examples
///
/// ```
/// use bounded_cache::LifoCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LifoCache::new(NonZeroUsize::new(2).unwrap());
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// assert_eq!(cache.put("c", 3), Some(("b", 2)));
/// assert!(cache.contains(&"a"));
/// assert!(cache.contains(&"c"));
/// ```
pub type LifoCache<K, V, S = DefaultHashBuilder> = Cache<K, V, LifoTracker<K, S>>;
