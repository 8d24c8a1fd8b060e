//! Morton (Z-order) codec for 2D grid coordinates.
//!
//! Bit `k` of the row lands on key bit `2k`, bit `k` of the column on key bit `2k + 1`.
//! The key width is chosen by type: every [`MortonKey`] fixes a coordinate type of
//! exactly half its width, so out-of-width coordinates cannot be expressed.
//!
//! | key    | coordinate |
//! |--------|------------|
//! | `u16`  | `u8`       |
//! | `u32`  | `u16`      |
//! | `u64`  | `u32`      |
//! | `u128` | `u64`      |

use std::fmt::{Debug, Display};
use std::hash::Hash;

// Spread/compact masks for the widest key; narrower keys truncate them.
const LANES_1: u128 = 0x5555_5555_5555_5555_5555_5555_5555_5555;
const LANES_2: u128 = 0x3333_3333_3333_3333_3333_3333_3333_3333;
const LANES_4: u128 = 0x0F0F_0F0F_0F0F_0F0F_0F0F_0F0F_0F0F_0F0F;
const LANES_8: u128 = 0x00FF_00FF_00FF_00FF_00FF_00FF_00FF_00FF;
const LANES_16: u128 = 0x0000_FFFF_0000_FFFF_0000_FFFF_0000_FFFF;
const LANES_32: u128 = 0x0000_0000_FFFF_FFFF_0000_0000_FFFF_FFFF;
const LANES_64: u128 = 0x0000_0000_0000_0000_FFFF_FFFF_FFFF_FFFF;

/// (shift, mask) rounds that spread a coordinate onto every other bit, widest first
const SPREAD_ROUNDS: [(u32, u128); 6] = [
    (32, LANES_32),
    (16, LANES_16),
    (8, LANES_8),
    (4, LANES_4),
    (2, LANES_2),
    (1, LANES_1),
];

/// (shift, mask) rounds that gather every other bit back into a coordinate
const COMPACT_ROUNDS: [(u32, u128); 6] = [
    (1, LANES_2),
    (2, LANES_4),
    (4, LANES_8),
    (8, LANES_16),
    (16, LANES_32),
    (32, LANES_64),
];

/// An unsigned integer usable as a 2D Morton key.
///
/// Besides the codec itself the trait carries the bit-level helpers the BIGMIN
/// search needs. `load_min` and `load_max` are the LOAD operations of the
/// Tropf-Herzog range search: they overwrite bit `p` and the lower bits of the
/// same dimension, leaving the other dimension untouched.
pub trait MortonKey:
    Copy + Ord + Hash + Debug + Display + Into<u128> + Send + Sync + 'static
{
    /// Coordinate type, exactly half as wide as the key
    type Coord: Copy + Ord + Hash + Debug + Display + Into<u64> + Send + Sync + 'static;

    /// Bits per coordinate (W)
    const COORD_BITS: u32;
    /// Bits per key (2W)
    const KEY_BITS: u32;
    /// Key bits owned by the row (even positions)
    const ROW_BITS: Self;
    /// Key bits owned by the column (odd positions)
    const COL_BITS: Self;

    /// Interleaves a coordinate pair into a key
    fn interleave(row: Self::Coord, col: Self::Coord) -> Self;

    /// Splits a key back into its `(row, col)` pair
    fn deinterleave(self) -> (Self::Coord, Self::Coord);

    /// Returns whether bit `p` is set
    fn bit(self, p: u32) -> bool;

    /// Sets bit `p` and clears the same-dimension bits below it (LOAD `1000..`)
    #[must_use]
    fn load_min(self, p: u32) -> Self;

    /// Clears bit `p` and sets the same-dimension bits below it (LOAD `0111..`)
    #[must_use]
    fn load_max(self, p: u32) -> Self;

    /// The next key, or `None` at the top of the key space
    fn successor(self) -> Option<Self>;
}

/// Bits strictly below `p` that belong to the same coordinate as bit `p`
macro_rules! same_dimension_below {
    ($key:ty, $p:expr) => {{
        let p: u32 = $p;
        let lanes = if p % 2 == 0 {
            <$key as MortonKey>::ROW_BITS
        } else {
            <$key as MortonKey>::COL_BITS
        };
        if p == 0 {
            0
        } else {
            lanes & (<$key>::MAX >> (<$key>::BITS - p))
        }
    }};
}

macro_rules! impl_morton_key {
    ($key:ty, $coord:ty) => {
        #[allow(
            trivial_numeric_casts,
            clippy::cast_possible_truncation,
            reason = "the shared u128 masks are truncated to the key width"
        )]
        impl MortonKey for $key {
            type Coord = $coord;

            const COORD_BITS: u32 = <$coord>::BITS;
            const KEY_BITS: u32 = <$key>::BITS;
            const ROW_BITS: Self = LANES_1 as $key;
            const COL_BITS: Self = !(LANES_1 as $key);

            #[inline]
            fn interleave(row: $coord, col: $coord) -> Self {
                let spread = |c: $coord| {
                    let mut x = <$key>::from(c);
                    for &(shift, mask) in &SPREAD_ROUNDS {
                        if shift < Self::COORD_BITS {
                            x = (x | (x << shift)) & mask as $key;
                        }
                    }
                    x
                };
                spread(row) | (spread(col) << 1)
            }

            #[inline]
            fn deinterleave(self) -> ($coord, $coord) {
                let compact = |z: $key| {
                    let mut x = z & Self::ROW_BITS;
                    for &(shift, mask) in &COMPACT_ROUNDS {
                        if shift < Self::COORD_BITS {
                            x = (x | (x >> shift)) & mask as $key;
                        }
                    }
                    x as $coord
                };
                (compact(self), compact(self >> 1))
            }

            #[inline]
            fn bit(self, p: u32) -> bool {
                (self >> p) & 1 == 1
            }

            #[inline]
            fn load_min(self, p: u32) -> Self {
                let bit: $key = 1 << p;
                let below = same_dimension_below!($key, p);
                (self & !(bit | below)) | bit
            }

            #[inline]
            fn load_max(self, p: u32) -> Self {
                let bit: $key = 1 << p;
                let below = same_dimension_below!($key, p);
                (self & !(bit | below)) | below
            }

            #[inline]
            fn successor(self) -> Option<Self> {
                self.checked_add(1)
            }
        }
    };
}

impl_morton_key!(u16, u8);
impl_morton_key!(u32, u16);
impl_morton_key!(u64, u32);
impl_morton_key!(u128, u64);

/// Interleaves `(row, col)` into a Morton key of type `K`
///
/// # Example
/// ```
/// use zorder::morton::interleave;
/// assert_eq!(interleave::<u32>(5, 5), 51);
/// ```
#[inline]
pub fn interleave<K: MortonKey>(row: K::Coord, col: K::Coord) -> K {
    K::interleave(row, col)
}

/// Decodes a Morton key into `(row, col)`
///
/// # Example
/// ```
/// use zorder::morton::deinterleave;
/// assert_eq!(deinterleave(51u32), (5, 5));
/// ```
#[inline]
pub fn deinterleave<K: MortonKey>(key: K) -> (K::Coord, K::Coord) {
    key.deinterleave()
}
