//! Order Tracker contract.
//!
//! An order tracker records the ordering one eviction policy needs and answers
//! a single question: which key goes next. The [`Cache`](crate::Cache) facade
//! drives it in lockstep with the key/value store, so a key is present in the
//! tracker if and only if it is present in the store.
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!   put / get ──▶ │        Cache<K, V, T>         │
//!                 │                               │
//!                 │  Store<K, V>   ◀──lockstep──▶ T: OrderTracker<K>
//!                 └──────────────────────────────┘
//!                                                  ├── FifoTracker  victim = oldest
//!                                                  ├── LifoTracker  victim = newest
//!                                                  ├── MruTracker   victim = most recently touched
//!                                                  └── LfuTracker   victim = least frequent, then least recent
//! ```
//!
//! This module also holds [`KeyOrder`], the hash-indexed key sequence the
//! FIFO, LIFO and MRU trackers are built on.

extern crate alloc;

use crate::list::{Entry, List};
use crate::{DefaultHashBuilder, HashMap};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};

/// The per-policy ordering used by a [`Cache`](crate::Cache) to pick
/// eviction victims.
///
/// Implementations must keep exactly one ordering record per key and must
/// never hand out a victim that was not recorded with
/// [`record_insert`](OrderTracker::record_insert).
pub trait OrderTracker<K>: Sized {
    /// Hash builder used by the tracker and by the store of the cache that
    /// owns it.
    type Hasher: BuildHasher;

    /// Policy name reported through metrics, e.g. `"FIFO"`.
    const POLICY: &'static str;

    /// Creates an empty tracker sized for `capacity` keys.
    fn with_hasher(capacity: usize, hash_builder: Self::Hasher) -> Self;

    /// Records a key that was not previously tracked.
    fn record_insert(&mut self, key: K);

    /// Records a successful read of `key`. No-op for policies that ignore
    /// reads.
    fn record_access<Q>(&mut self, _key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
    }

    /// Records a value replacement for an already tracked `key`.
    fn record_update<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Removes and returns the key that should be evicted next.
    fn next_eviction_victim(&mut self) -> Option<K>;

    /// Returns the key [`next_eviction_victim`](OrderTracker::next_eviction_victim)
    /// would return, without removing it.
    fn peek_victim(&self) -> Option<&K>;

    /// Stops tracking `key`. Returns `false` if it was not tracked.
    fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    /// Returns `true` if no keys are tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every key.
    fn clear(&mut self);
}

/// A sequence of distinct keys, oldest at the front, with O(1) lookup of any
/// key's position.
///
/// # Safety
///
/// `map` holds raw pointers into `list`. They stay valid because:
/// - every pointer was returned by `list.push_back()`
/// - the map entry is removed in the same operation that frees the node
/// - nodes are never moved to another list
pub(crate) struct KeyOrder<K, S = DefaultHashBuilder> {
    map: HashMap<K, *mut Entry<K>, S>,
    list: List<K>,
}

// SAFETY: KeyOrder owns all nodes its pointers refer to.
unsafe impl<K: Send, S: Send> Send for KeyOrder<K, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause data races.
unsafe impl<K: Sync, S: Sync> Sync for KeyOrder<K, S> {}

impl<K: Hash + Eq + Clone, S: BuildHasher> KeyOrder<K, S> {
    pub(crate) fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        KeyOrder {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            list: List::new(),
        }
    }

    /// Appends `key` at the back, or moves it there if already present.
    pub(crate) fn push_back(&mut self, key: K) {
        if let Some(&node) = self.map.get(&key) {
            // SAFETY: node comes from our map
            unsafe { self.list.move_to_back(node) };
            return;
        }
        let node = self.list.push_back(key.clone());
        self.map.insert(key, node);
    }

    /// Moves `key` to the back. Returns `false` if it is not present.
    pub(crate) fn move_to_back<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key) {
            Some(&node) => {
                // SAFETY: node comes from our map
                unsafe { self.list.move_to_back(node) };
                true
            }
            None => false,
        }
    }

    pub(crate) fn pop_front(&mut self) -> Option<K> {
        let key = self.list.pop_front()?;
        self.map.remove(&key);
        Some(key)
    }

    pub(crate) fn pop_back(&mut self) -> Option<K> {
        let key = self.list.pop_back()?;
        self.map.remove(&key);
        Some(key)
    }

    #[inline]
    pub(crate) fn front(&self) -> Option<&K> {
        self.list.front()
    }

    #[inline]
    pub(crate) fn back(&self) -> Option<&K> {
        self.list.back()
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.remove(key) {
            Some(node) => {
                // SAFETY: node came from our map and is dropped from it above
                unsafe { self.list.remove(node) };
                true
            }
            None => false,
        }
    }

    #[inline]
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }
}

impl<K, S> fmt::Debug for KeyOrder<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyOrder")
            .field("len", &self.list.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn order() -> KeyOrder<&'static str> {
        KeyOrder::with_hasher(4, DefaultHashBuilder::default())
    }

    fn drain(order: &mut KeyOrder<&'static str>) -> Vec<&'static str> {
        let mut out = Vec::new();
        while let Some(k) = order.pop_front() {
            out.push(k);
        }
        out
    }

    #[test]
    fn test_push_back_reorders_existing_key() {
        let mut order = order();
        order.push_back("a");
        order.push_back("b");
        order.push_back("a");
        assert_eq!(order.len(), 2);
        assert_eq!(order.front(), Some(&"b"));
        assert_eq!(order.back(), Some(&"a"));
        assert_eq!(drain(&mut order), ["b", "a"]);
    }

    #[test]
    fn test_move_to_back_and_remove() {
        let mut order = order();
        order.push_back("a");
        order.push_back("b");
        order.push_back("c");

        assert!(order.move_to_back(&"a"));
        assert!(!order.move_to_back(&"missing"));
        assert!(order.remove(&"b"));
        assert!(!order.remove(&"b"));
        assert!(!order.contains(&"b"));

        assert_eq!(drain(&mut order), ["c", "a"]);
        assert_eq!(order.len(), 0);
    }

    #[test]
    fn test_pop_keeps_map_in_sync() {
        let mut order = order();
        order.push_back("a");
        order.push_back("b");
        assert_eq!(order.pop_back(), Some("b"));
        assert!(!order.contains(&"b"));
        assert_eq!(order.pop_front(), Some("a"));
        assert!(!order.contains(&"a"));
        assert_eq!(order.pop_front(), None);
    }

    #[test]
    fn test_clear() {
        let mut order = order();
        order.push_back("a");
        order.clear();
        assert_eq!(order.len(), 0);
        assert!(order.front().is_none());
        order.push_back("a");
        assert_eq!(order.len(), 1);
    }
}
