//! Error type shared by the indexer and the reference scanner.

use std::fmt;

use thiserror::Error;

/// Result type for z-order operations
pub type ZOrderResult<T> = Result<T, ZOrderError>;

/// Axis of a query rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Row (even key bits)
    Row,
    /// Column (odd key bits)
    Col,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Col => f.write_str("col"),
        }
    }
}

/// Errors produced by [`ZOrderIndexer`](crate::ZOrderIndexer).
///
/// Keys are widened to `u128` and coordinates to `u64` so the error does not
/// depend on the key width.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ZOrderError {
    /// Rectangle bounds are out of order
    #[error("invalid {axis} range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Offending axis
        axis: Axis,
        /// Lower bound as given
        min: u64,
        /// Upper bound as given
        max: u64,
    },

    /// The reference scanner was asked about a key outside `[min_z, max_z)`
    #[error("key {key} is outside the scan range [{min_z}, {max_z})")]
    OutOfRange {
        /// Key passed by the caller
        key: u128,
        /// Corner key of the rectangle's minimum
        min_z: u128,
        /// Corner key of the rectangle's maximum
        max_z: u128,
    },

    /// The search reached a state that a well-formed rectangle cannot produce
    #[error("z-order search failed for key {key}: {reason}")]
    InternalInvariant {
        /// Key the search started from
        key: u128,
        /// Which invariant broke
        reason: &'static str,
    },
}
