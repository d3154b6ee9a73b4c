//! Cache Configuration Module
//!
//! Every bounded eviction policy in this crate takes the same configuration:
//! a maximum number of entries. The unbounded cache takes no configuration.
//!
//! # Design Philosophy
//!
//! The configuration struct has public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Validated once**: `max_items` is checked when the cache is built, never
//!   on a later `put`
//! - **Immutable afterwards**: the cache copies the validated capacity into a
//!   private field; there is no setter
//!
//! # Examples
//!
//! ```
//! use bounded_cache::config::CacheConfig;
//! use bounded_cache::FifoCache;
//!
//! let config = CacheConfig { max_items: 4 };
//! let cache: FifoCache<&str, i32> = FifoCache::init(config, None).unwrap();
//! assert_eq!(cache.cap().get(), 4);
//!
//! // Zero is rejected at construction time
//! let bad = FifoCache::<&str, i32>::init(CacheConfig { max_items: 0 }, None);
//! assert!(bad.is_err());
//! ```

use crate::error::{CacheError, Result};
use core::fmt;
use core::num::NonZeroUsize;

/// Number of entries a cache built from [`CacheConfig::default`] can hold.
pub const DEFAULT_MAX_ITEMS: usize = 4;

/// Configuration shared by the FIFO, LIFO, MRU and LFU caches.
///
/// # Fields
///
/// - `max_items`: Maximum number of entries the cache can hold. Must be
///   positive; zero makes [`validate`](CacheConfig::validate) fail with
///   [`CacheError::InvalidCapacity`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub max_items: usize,
}

impl CacheConfig {
    /// Creates a configuration for a cache holding at most `max_items` entries.
    #[inline]
    pub const fn new(max_items: usize) -> Self {
        Self { max_items }
    }

    /// Checks that `max_items` is a positive integer and returns it as a
    /// [`NonZeroUsize`].
    pub fn validate(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.max_items).ok_or(CacheError::InvalidCapacity {
            max_items: self.max_items,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS)
    }
}

impl From<NonZeroUsize> for CacheConfig {
    fn from(cap: NonZeroUsize) -> Self {
        Self::new(cap.get())
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("max_items", &self.max_items)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = CacheConfig { max_items: 100 };
        assert_eq!(config.max_items, 100);
        assert_eq!(config.validate().unwrap().get(), 100);
    }

    #[test]
    fn test_config_default_matches_constant() {
        assert_eq!(CacheConfig::default().max_items, DEFAULT_MAX_ITEMS);
    }

    #[test]
    fn test_config_rejects_zero() {
        let err = CacheConfig::new(0).validate().unwrap_err();
        assert_eq!(err, CacheError::InvalidCapacity { max_items: 0 });
    }

    #[test]
    fn test_config_from_non_zero() {
        let config = CacheConfig::from(NonZeroUsize::new(7).unwrap());
        assert_eq!(config, CacheConfig::new(7));
    }
}
