#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Policy Selection Guide
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 Which eviction policy should I use?                 │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  Does the data set fit in memory?  ──Yes──▶ UnboundedCache          │
//! │           │                                                         │
//! │          No                                                         │
//! │           ▼                                                         │
//! │  Are some keys read far more often than others?                     │
//! │           │                                                         │
//! │     Yes ──┴──▶ LfuCache                                             │
//! │           │                                                         │
//! │          No                                                         │
//! │           ▼                                                         │
//! │  Cyclic scans slightly larger than the cache?  ──Yes──▶ MruCache    │
//! │           │                                                         │
//! │          No                                                         │
//! │           ▼                                                         │
//! │  Should the oldest entries survive?  ──Yes──▶ LifoCache             │
//! │           │                                                         │
//! │          No ──▶ FifoCache                                           │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Cache | Victim | Reads reorder? |
//! |-------|--------|----------------|
//! | [`FifoCache`] | Oldest inserted or updated key | No |
//! | [`LifoCache`] | Newest inserted or updated key | No |
//! | [`MruCache`] | Most recently read or updated key | Yes |
//! | [`LfuCache`] | Lowest frequency, least recent among ties | Yes |
//! | [`UnboundedCache`] | Never evicts | n/a |
//!
//! ## Performance Characteristics
//!
//! | Cache | Get | Put | Remove |
//! |-------|-----|-----|--------|
//! | FIFO  | O(1)| O(1)| O(1)   |
//! | LIFO  | O(1)| O(1)| O(1)   |
//! | MRU   | O(1)| O(1)| O(1)   |
//! | LFU   | O(log b) | O(log b) | O(log b) |
//!
//! where b is the number of distinct access counts currently in use.
//!
//! ## Configuration
//!
//! Every bounded cache takes one option, `max_items`, which must be positive:
//!
//! ```rust
//! use bounded_cache::{CacheError, FifoCache};
//! use bounded_cache::config::CacheConfig;
//!
//! let cache: FifoCache<u32, u32> = FifoCache::init(CacheConfig::default(), None).unwrap();
//! assert_eq!(cache.cap().get(), 4);
//!
//! let err = FifoCache::<u32, u32>::init(CacheConfig::new(0), None).unwrap_err();
//! assert_eq!(err, CacheError::InvalidCapacity { max_items: 0 });
//! ```
//!
//! ## Eviction notifications
//!
//! A sink installed with [`Cache::with_sink`] sees the key of every entry
//! evicted for capacity. [`TracingSink`] logs `DISCARD: <key>` through
//! `tracing`.
//!
//! ```rust
//! use bounded_cache::{LifoCache, TracingSink};
//! use core::num::NonZeroUsize;
//!
//! let mut cache = LifoCache::new(NonZeroUsize::new(2).unwrap()).with_sink(TracingSink);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.put("C", 3); // logs "DISCARD: B"
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `hashbrown` | yes | Use `hashbrown` maps, for `no_std` builds |
//! | `std` | no | Enable `std` support in dependencies |
//! | `concurrent` | no | [`concurrent::ConcurrentCache`] behind a `parking_lot` mutex |
//! | `nightly` | no | Nightly optimizations in `hashbrown` |

#![no_std]

#[cfg(not(feature = "hashbrown"))]
extern crate std;

#[cfg(feature = "hashbrown")]
pub use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
pub(crate) use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
pub use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
pub(crate) use std::collections::HashMap;

/// Doubly linked list with raw-pointer node handles.
///
/// **Note**: This module is internal infrastructure. It exposes unsafe raw
/// pointer operations that require careful invariant maintenance.
pub(crate) mod list;

/// Key/value store shared by every cache.
pub(crate) mod store;

/// Error types.
pub mod error;

/// Cache configuration.
pub mod config;

/// Cache metrics system.
///
/// Every cache counts requests, hits, insertions, updates, evictions and
/// removals, and reports them through [`CacheMetrics`].
pub mod metrics;

/// Eviction notification sinks.
pub mod sink;

/// The order tracker contract implemented by each eviction policy.
pub mod tracker;

/// The bounded cache facade shared by all policies.
pub mod cache;

/// First-in-first-out eviction.
pub mod fifo;

/// Last-in-first-out eviction.
pub mod lifo;

/// Most-recently-used eviction.
pub mod mru;

/// Least-frequently-used eviction with a least-recently-used tie-break.
pub mod lfu;

/// Cache that never evicts.
pub mod unbounded;

/// Thread-safe wrapper around a bounded cache.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use cache::Cache;
pub use config::{CacheConfig, DEFAULT_MAX_ITEMS};
pub use error::{CacheError, Result};
pub use fifo::{FifoCache, FifoTracker};
pub use lfu::{LfuCache, LfuTracker};
pub use lifo::{LifoCache, LifoTracker};
pub use metrics::{CacheMetrics, CoreCacheMetrics};
pub use mru::{MruCache, MruTracker};
pub use sink::{EvictionSink, TracingSink};
pub use tracker::OrderTracker;
pub use unbounded::UnboundedCache;

#[cfg(feature = "concurrent")]
pub use concurrent::{
    ConcurrentCache, ConcurrentFifoCache, ConcurrentLfuCache, ConcurrentLifoCache,
    ConcurrentMruCache,
};
