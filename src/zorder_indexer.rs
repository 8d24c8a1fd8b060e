//! Rectangle indexer over Morton keys with BIGMIN skip-ahead.
//!
//! A [`ZOrderIndexer`] holds one axis-aligned query rectangle and its two corner
//! keys. Walking a Morton-ordered key space, a scan that steps outside the
//! rectangle calls [`ZOrderIndexer::next_key`] to jump straight to the next key
//! inside it, instead of decoding every key in between.
//!
//! The indexer is immutable after construction and is a plain `Copy` value, so it
//! can be shared freely between threads.

use std::iter::FusedIterator;
use std::ops::RangeInclusive;

use log::{debug, error, trace};

use crate::error::{Axis, ZOrderError, ZOrderResult};
use crate::morton::MortonKey;

/// Query rectangle in Z-order key space
///
/// `min_z` and `max_z` are the keys of the `(row_min, col_min)` and
/// `(row_max, col_max)` corners. Interleaving is monotone in each coordinate,
/// so for a well-formed rectangle they are also its smallest and largest keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ZOrderIndexer<K: MortonKey> {
    pub(crate) row_min: K::Coord,
    pub(crate) row_max: K::Coord,
    pub(crate) col_min: K::Coord,
    pub(crate) col_max: K::Coord,
    pub(crate) min_z: K,
    pub(crate) max_z: K,
}

/// Indexer with 16-bit keys and `u8` coordinates
pub type ZOrderIndexer16 = ZOrderIndexer<u16>;
/// Indexer with 32-bit keys and `u16` coordinates
pub type ZOrderIndexer32 = ZOrderIndexer<u32>;
/// Indexer with 64-bit keys and `u32` coordinates
pub type ZOrderIndexer64 = ZOrderIndexer<u64>;
/// Indexer with 128-bit keys and `u64` coordinates
pub type ZOrderIndexer128 = ZOrderIndexer<u128>;

impl<K: MortonKey> ZOrderIndexer<K> {
    /// Creates an indexer for the rectangle `rows` x `cols` (both inclusive)
    ///
    /// # Errors
    /// Returns [`ZOrderError::InvalidRange`] if either range has `min > max`.
    ///
    /// # Example
    /// ```
    /// use zorder::ZOrderIndexer32;
    /// let indexer = ZOrderIndexer32::new(2..=4, 2..=5).unwrap();
    /// assert_eq!(indexer.min_z(), 12);
    /// assert_eq!(indexer.max_z(), 50);
    /// assert!(ZOrderIndexer32::new(4..=2, 2..=5).is_err());
    /// ```
    pub fn new(rows: RangeInclusive<K::Coord>, cols: RangeInclusive<K::Coord>) -> ZOrderResult<Self> {
        check_order(Axis::Row, &rows)?;
        check_order(Axis::Col, &cols)?;

        let indexer = Self::new_unchecked(rows, cols);
        debug!(
            "z-order indexer rows {}..={} cols {}..={}: min_z={} max_z={}",
            indexer.row_min, indexer.row_max, indexer.col_min, indexer.col_max, indexer.min_z, indexer.max_z
        );
        Ok(indexer)
    }

    /// Creates an indexer without validating the bounds
    ///
    /// Inverted ranges are accepted as given. Queries on such an indexer return
    /// meaningless keys or [`ZOrderError::InternalInvariant`].
    pub fn new_unchecked(rows: RangeInclusive<K::Coord>, cols: RangeInclusive<K::Coord>) -> Self {
        let (row_min, row_max) = rows.into_inner();
        let (col_min, col_max) = cols.into_inner();
        Self {
            row_min,
            row_max,
            col_min,
            col_max,
            min_z: K::interleave(row_min, col_min),
            max_z: K::interleave(row_max, col_max),
        }
    }

    /// Morton key of `(row, col)`
    #[inline]
    pub fn key(row: K::Coord, col: K::Coord) -> K {
        K::interleave(row, col)
    }

    /// `(row, col)` of a Morton key
    #[inline]
    pub fn coords(key: K) -> (K::Coord, K::Coord) {
        key.deinterleave()
    }

    /// Key of the `(row_min, col_min)` corner
    pub fn min_z(&self) -> K {
        self.min_z
    }

    /// Key of the `(row_max, col_max)` corner
    pub fn max_z(&self) -> K {
        self.max_z
    }

    /// Row bounds (inclusive)
    pub fn rows(&self) -> RangeInclusive<K::Coord> {
        self.row_min..=self.row_max
    }

    /// Column bounds (inclusive)
    pub fn cols(&self) -> RangeInclusive<K::Coord> {
        self.col_min..=self.col_max
    }

    /// Number of grid cells inside the rectangle
    ///
    /// Saturates at `u128::MAX` for the full 128-bit key space.
    pub fn cell_count(&self) -> u128 {
        span(self.row_min.into(), self.row_max.into())
            .saturating_mul(span(self.col_min.into(), self.col_max.into()))
    }

    /// Returns whether the cell addressed by `z` lies inside the rectangle
    #[inline]
    pub fn contains(&self, z: K) -> bool {
        let (row, col) = z.deinterleave();
        self.row_min <= row && row <= self.row_max && self.col_min <= col && col <= self.col_max
    }

    /// Smallest key strictly greater than `z` that lies inside the rectangle (BIGMIN)
    ///
    /// Meant to be called with `min_z <= z < max_z`, typically right after `z`
    /// was found to be outside the rectangle. The precondition is not checked.
    /// Runs in time proportional to the key width.
    ///
    /// # Errors
    /// Returns [`ZOrderError::InternalInvariant`] if the bit scan reaches a state
    /// that a well-formed rectangle cannot produce, e.g. for an inverted
    /// rectangle built with [`new_unchecked`](Self::new_unchecked) or a `z`
    /// outside the precondition.
    ///
    /// # Example
    /// ```
    /// use zorder::ZOrderIndexer32;
    /// let indexer = ZOrderIndexer32::new(2..=4, 2..=5).unwrap();
    /// // key 16 is cell (4, 0), left of the rectangle
    /// assert!(!indexer.contains(16));
    /// assert_eq!(indexer.next_key(16).unwrap(), 24);
    /// ```
    pub fn next_key(&self, z: K) -> ZOrderResult<K> {
        if let Some(next) = z.successor().filter(|&next| self.contains(next)) {
            return Ok(next);
        }

        trace!("bigmin scan from key {z} in [{}, {}]", self.min_z, self.max_z);

        let mut lo = self.min_z;
        let mut hi = self.max_z;
        // First key of the upper half at the most recent split
        let mut bigmin: Option<K> = None;

        for p in (0..K::KEY_BITS).rev() {
            match (z.bit(p), lo.bit(p), hi.bit(p)) {
                (false, false, false) | (true, true, true) => {}
                (false, false, true) => {
                    bigmin = Some(lo.load_min(p));
                    hi = hi.load_max(p);
                }
                (false, true, true) => return Ok(lo),
                (true, false, false) => {
                    return bigmin.ok_or_else(|| self.invariant_failure(z, "no candidate before leaving the range"));
                }
                (true, false, true) => lo = lo.load_min(p),
                (_, true, false) => {
                    return Err(self.invariant_failure(z, "lower bound exceeds upper bound"));
                }
            }
        }

        bigmin.ok_or_else(|| self.invariant_failure(z, "bit scan ended without a candidate"))
    }

    /// Iterates all keys inside the rectangle in ascending Z-order
    ///
    /// Starts at `min_z` and steps with [`next_key`](Self::next_key). The
    /// iterator stops after `max_z`, or after yielding the first error.
    ///
    /// # Example
    /// ```
    /// use zorder::ZOrderIndexer32;
    /// let indexer = ZOrderIndexer32::new(2..=4, 2..=5).unwrap();
    /// let keys: Vec<u32> = indexer.keys().collect::<Result<_, _>>().unwrap();
    /// assert_eq!(keys, [12, 13, 14, 15, 24, 26, 36, 37, 38, 39, 48, 50]);
    /// ```
    pub fn keys(&self) -> ZOrderKeys<K> {
        let first = Some(self.min_z).filter(|&z| self.contains(z));
        ZOrderKeys { indexer: *self, pending: first.map(Ok) }
    }

    pub(crate) fn invariant_failure(&self, z: K, reason: &'static str) -> ZOrderError {
        error!(
            "z-order search from key {z} failed ({reason}); rows {}..={} cols {}..={}",
            self.row_min, self.row_max, self.col_min, self.col_max
        );
        ZOrderError::InternalInvariant { key: z.into(), reason }
    }
}

fn check_order<C: Copy + Ord + Into<u64>>(axis: Axis, range: &RangeInclusive<C>) -> ZOrderResult<()> {
    let (min, max) = (*range.start(), *range.end());
    if min > max {
        return Err(ZOrderError::InvalidRange { axis, min: min.into(), max: max.into() });
    }
    Ok(())
}

fn span(min: u64, max: u64) -> u128 {
    if min > max { 0 } else { u128::from(max - min) + 1 }
}

/// Ascending iterator over the keys of a [`ZOrderIndexer`]
///
/// Created by [`ZOrderIndexer::keys`].
#[derive(Clone, Debug)]
pub struct ZOrderKeys<K: MortonKey> {
    indexer: ZOrderIndexer<K>,
    pending: Option<ZOrderResult<K>>,
}

impl<K: MortonKey> Iterator for ZOrderKeys<K> {
    type Item = ZOrderResult<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.pending.take()?;
        if let Ok(current) = item {
            if current < self.indexer.max_z {
                self.pending = Some(self.indexer.next_key(current).and_then(|next| {
                    if next > current {
                        Ok(next)
                    } else {
                        Err(self.indexer.invariant_failure(current, "next key did not advance"))
                    }
                }));
            }
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.pending {
            Some(_) => (1, usize::try_from(self.indexer.cell_count()).ok()),
            None => (0, Some(0)),
        }
    }
}

impl<K: MortonKey> FusedIterator for ZOrderKeys<K> {}
