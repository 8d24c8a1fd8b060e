//! # zorder - Z-order (Morton) keys with BIGMIN range navigation
//!
//! A small library for 2D grids keyed by Morton codes. It interleaves
//! `(row, col)` pairs into scalar keys and walks all keys of an axis-aligned
//! rectangle without visiting the keys in between that fall outside it.
//!
//! ## Features
//!
//! - **Morton codec**: bit interleave/deinterleave for 16, 32, 64 and 128-bit keys
//! - **BIGMIN skip-ahead**: next key inside a rectangle in O(key bits)
//! - **Reference scanner**: brute-force oracle for checking BIGMIN results
//! - **Stateless**: an indexer is an immutable `Copy` value, safe to share across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use zorder::prelude::*;
//!
//! # fn main() -> Result<(), ZOrderError> {
//! // Rows 2..=4, columns 2..=5 on a 16-bit coordinate grid
//! let indexer = ZOrderIndexer32::new(2..=4, 2..=5)?;
//!
//! // Enumerate every key inside the rectangle in Z-order
//! let keys: Vec<u32> = indexer.keys().collect::<Result<_, _>>()?;
//! assert_eq!(keys.len(), 12);
//! assert_eq!(ZOrderIndexer32::coords(keys[0]), (2, 2));
//!
//! // A scan that lands outside the rectangle jumps straight back in
//! let outside = ZOrderIndexer32::key(4, 0);
//! assert!(!indexer.contains(outside));
//! assert_eq!(indexer.next_key(outside)?, ZOrderIndexer32::key(4, 2));
//! # Ok(())
//! # }
//! ```
//!
//! ## How It Works
//!
//! Bit `k` of the row is stored in key bit `2k` and bit `k` of the column in key
//! bit `2k + 1`. Sorting by key visits the grid in Z-order, but a rectangle's
//! keys are not contiguous in that order. When a range scan over a Morton-keyed
//! store reads a key outside the rectangle, [`ZOrderIndexer::next_key`] returns
//! the smallest key above it that is back inside (the BIGMIN of Tropf and
//! Herzog). The scan then seeks there, so its cost follows the number of
//! matching cells rather than the distance between the corner keys.

pub mod error;
pub mod morton;
pub mod prelude;
mod reference;
pub mod zorder_indexer;

pub use error::{Axis, ZOrderError, ZOrderResult};
pub use morton::MortonKey;
pub use zorder_indexer::{
    ZOrderIndexer, ZOrderIndexer16, ZOrderIndexer32, ZOrderIndexer64, ZOrderIndexer128, ZOrderKeys,
};

#[cfg(test)]
mod component_tests;
