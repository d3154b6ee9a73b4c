//! Property-Based Tests for Eviction Policies
//!
//! Every bounded cache is driven with random operation sequences next to a
//! simple reference model of its policy. After each operation the evicted
//! entry, the cache size and the lookup results must agree with the model,
//! and the eviction sink must have seen every evicted key exactly once.

use bounded_cache::{
    Cache, DefaultHashBuilder, FifoTracker, LfuTracker, LifoTracker, MruTracker, OrderTracker,
    UnboundedCache,
};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

// == Strategies ==
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: u8, value: u32 },
    Get { key: u8 },
    Remove { key: u8 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (0u8..10, any::<u32>()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        2 => (0u8..10).prop_map(|key| CacheOp::Get { key }),
        1 => (0u8..10).prop_map(|key| CacheOp::Remove { key }),
    ]
}

// == Reference model ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    Fifo,
    Lifo,
    Mru,
    Lfu,
}

/// Obviously-correct, O(n) version of each policy.
struct Model {
    policy: Policy,
    cap: usize,
    values: HashMap<u8, u32>,
    /// Oldest touch first
    order: Vec<u8>,
    frequency: HashMap<u8, usize>,
    /// Logical time at which a key reached its current frequency
    stamp: HashMap<u8, u64>,
    clock: u64,
}

impl Model {
    fn new(policy: Policy, cap: usize) -> Self {
        Model {
            policy,
            cap,
            values: HashMap::new(),
            order: Vec::new(),
            frequency: HashMap::new(),
            stamp: HashMap::new(),
            clock: 0,
        }
    }

    fn touch(&mut self, key: u8) {
        self.order.retain(|k| *k != key);
        self.order.push(key);
        *self.frequency.entry(key).or_insert(0) += 1;
        self.clock += 1;
        self.stamp.insert(key, self.clock);
    }

    fn forget(&mut self, key: u8) {
        self.values.remove(&key);
        self.order.retain(|k| *k != key);
        self.frequency.remove(&key);
        self.stamp.remove(&key);
    }

    fn victim(&self) -> Option<u8> {
        match self.policy {
            Policy::Fifo => self.order.first().copied(),
            Policy::Lifo | Policy::Mru => self.order.last().copied(),
            Policy::Lfu => self
                .values
                .keys()
                .copied()
                .min_by_key(|k| (self.frequency[k], self.stamp[k])),
        }
    }

    fn put(&mut self, key: u8, value: u32) -> Option<(u8, u32)> {
        if self.values.contains_key(&key) {
            self.values.insert(key, value);
            self.touch(key);
            return None;
        }
        let mut evicted = None;
        if self.values.len() >= self.cap {
            if let Some(victim) = self.victim() {
                evicted = Some((victim, self.values[&victim]));
                self.forget(victim);
            }
        }
        self.values.insert(key, value);
        self.touch(key);
        evicted
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let value = self.values.get(&key).copied();
        if value.is_some() && matches!(self.policy, Policy::Mru | Policy::Lfu) {
            self.touch(key);
        }
        value
    }

    fn remove(&mut self, key: u8) -> Option<u32> {
        let value = self.values.get(&key).copied();
        self.forget(key);
        value
    }
}

fn check_against_model<T>(policy: Policy, cap: usize, ops: &[CacheOp]) -> Result<(), TestCaseError>
where
    T: OrderTracker<u8, Hasher = DefaultHashBuilder>,
{
    let discarded = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&discarded);
    let mut cache: Cache<u8, u32, T> = Cache::new(NonZeroUsize::new(cap).unwrap())
        .with_sink(move |key: &u8| log.lock().unwrap().push(*key));
    let mut model = Model::new(policy, cap);
    let mut expected_discards = Vec::new();

    for op in ops {
        match *op {
            CacheOp::Put { key, value } => {
                let evicted = model.put(key, value);
                prop_assert_eq!(cache.put(key, value), evicted, "put {}", key);
                expected_discards.extend(evicted.map(|(k, _)| k));
            }
            CacheOp::Get { key } => {
                prop_assert_eq!(cache.get(&key).copied(), model.get(key), "get {}", key);
            }
            CacheOp::Remove { key } => {
                prop_assert_eq!(cache.remove(&key), model.remove(key), "remove {}", key);
            }
        }
        prop_assert!(cache.len() <= cap);
        prop_assert_eq!(cache.len(), model.values.len());
        prop_assert_eq!(cache.peek_victim().copied(), model.victim());
    }
    let discarded = discarded.lock().unwrap().clone();
    prop_assert_eq!(discarded, expected_discards);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_fifo_matches_model(cap in 1usize..6, ops in prop::collection::vec(cache_op_strategy(), 0..120)) {
        check_against_model::<FifoTracker<u8>>(Policy::Fifo, cap, &ops)?;
    }

    #[test]
    fn prop_lifo_matches_model(cap in 1usize..6, ops in prop::collection::vec(cache_op_strategy(), 0..120)) {
        check_against_model::<LifoTracker<u8>>(Policy::Lifo, cap, &ops)?;
    }

    #[test]
    fn prop_mru_matches_model(cap in 1usize..6, ops in prop::collection::vec(cache_op_strategy(), 0..120)) {
        check_against_model::<MruTracker<u8>>(Policy::Mru, cap, &ops)?;
    }

    #[test]
    fn prop_lfu_matches_model(cap in 1usize..6, ops in prop::collection::vec(cache_op_strategy(), 0..120)) {
        check_against_model::<LfuTracker<u8>>(Policy::Lfu, cap, &ops)?;
    }

    /// Missing keys or values never change a cache
    #[test]
    fn prop_optional_put_without_both_parts_is_noop(
        keys in prop::collection::vec(0u8..10, 1..10),
        key in prop::option::of(0u8..10),
    ) {
        let mut cache: Cache<u8, u32, LfuTracker<u8>> = Cache::new(NonZeroUsize::new(4).unwrap());
        for k in &keys {
            cache.put(*k, u32::from(*k));
        }
        let before: Vec<_> = {
            let mut entries: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            entries.sort_unstable();
            entries
        };
        let victim = cache.peek_victim().copied();

        prop_assert_eq!(cache.put_optional(key, None), None);
        prop_assert_eq!(cache.put_optional(None, Some(7)), None);

        let mut after: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        after.sort_unstable();
        prop_assert_eq!(before, after);
        prop_assert_eq!(cache.peek_victim().copied(), victim);
    }

    /// The unbounded cache keeps every distinct key it is given
    #[test]
    fn prop_unbounded_keeps_everything(keys in prop::collection::vec(any::<u16>(), 0..500)) {
        let mut cache = UnboundedCache::new();
        for k in &keys {
            cache.put(*k, ());
        }
        let distinct: std::collections::HashSet<_> = keys.iter().collect();
        prop_assert_eq!(cache.len(), distinct.len());
        prop_assert!(keys.iter().all(|k| cache.contains(k)));
    }
}
