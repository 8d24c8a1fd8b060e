//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use zorder::prelude::*;
//! ```

pub use crate::{
    MortonKey, ZOrderError, ZOrderIndexer, ZOrderIndexer16, ZOrderIndexer32, ZOrderIndexer64,
    ZOrderIndexer128, ZOrderResult,
};
