//! Brute-force reference for [`ZOrderIndexer::next_key`].
//!
//! Scans keys one by one until it finds one inside the rectangle. Cost is linear
//! in the distance to the answer, so this is only suitable for checking the
//! BIGMIN result on small key spans.
//!
//! # Note
//! This is a reference implementation. For production use, see
//! [`ZOrderIndexer::next_key`].

use crate::ZOrderIndexer;
use crate::error::{ZOrderError, ZOrderResult};
use crate::morton::MortonKey;

impl<K: MortonKey> ZOrderIndexer<K> {
    /// Smallest key strictly greater than `z` inside the rectangle, by linear scan
    ///
    /// # Errors
    /// - [`ZOrderError::OutOfRange`] if `z < min_z` or `z >= max_z`
    /// - [`ZOrderError::InternalInvariant`] if nothing up to `max_z` is inside,
    ///   which only happens for an inverted rectangle
    ///
    /// # Example
    /// ```
    /// use zorder::ZOrderIndexer32;
    /// let indexer = ZOrderIndexer32::new(2..=4, 2..=5).unwrap();
    /// assert_eq!(indexer.next_key_reference(16).unwrap(), 24);
    /// assert!(indexer.next_key_reference(50).is_err());
    /// ```
    pub fn next_key_reference(&self, z: K) -> ZOrderResult<K> {
        if z < self.min_z || z >= self.max_z {
            return Err(ZOrderError::OutOfRange {
                key: z.into(),
                min_z: self.min_z.into(),
                max_z: self.max_z.into(),
            });
        }

        let mut candidate = z;
        while let Some(next) = candidate.successor().filter(|&next| next <= self.max_z) {
            if self.contains(next) {
                return Ok(next);
            }
            candidate = next;
        }

        Err(self.invariant_failure(z, "no key inside the rectangle up to max_z"))
    }
}
