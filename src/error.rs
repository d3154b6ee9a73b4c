//! Error types for cache construction.
//!
//! Cache misses and ignored `None` keys are not errors: they are reported as
//! `None` return values. The only hard failure in this crate is an invalid
//! configuration, surfaced once when a cache is built.

use thiserror::Error;

/// Errors returned by fallible cache constructors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CacheError {
    /// A bounded cache was configured with a capacity of zero.
    #[error("invalid capacity: max_items must be a positive integer, got {max_items}")]
    InvalidCapacity {
        /// The rejected value.
        max_items: usize,
    },
}

/// Convenience `Result` alias for cache construction.
pub type Result<T> = core::result::Result<T, CacheError>;
