//! Component tests for ZOrderIndexer
//!
//! These tests verify construction, containment, the BIGMIN walk and the error
//! surfaces on fixed rectangles with known key sets.

#[cfg(test)]
mod tests {
    use std::ops::RangeInclusive;

    use crate::{
        Axis, MortonKey, ZOrderError, ZOrderIndexer, ZOrderIndexer16, ZOrderIndexer32,
        ZOrderIndexer64, ZOrderIndexer128,
    };

    /// Seeds with min_z and feeds every result back into next_key
    fn walk<K: MortonKey>(indexer: &ZOrderIndexer<K>, expected_len: usize) -> Vec<K> {
        let mut z = indexer.min_z();
        let mut keys = vec![z];
        while z < indexer.max_z() && keys.len() <= expected_len {
            z = indexer.next_key(z).unwrap();
            keys.push(z);
        }
        keys.sort_unstable();
        keys
    }

    /// Same walk, stepping with the reference scanner
    fn walk_reference<K: MortonKey>(indexer: &ZOrderIndexer<K>) -> Vec<K> {
        let mut z = indexer.min_z();
        let mut keys = vec![z];
        while z < indexer.max_z() {
            z = indexer.next_key_reference(z).unwrap();
            keys.push(z);
        }
        keys
    }

    fn brute_force(rows: RangeInclusive<u16>, cols: RangeInclusive<u16>) -> Vec<u32> {
        let mut keys: Vec<u32> = rows
            .flat_map(|r| cols.clone().map(move |c| ZOrderIndexer32::key(r, c)))
            .collect();
        keys.sort_unstable();
        keys
    }

    // ============================================================================
    // CONSTRUCTION TESTS
    // ============================================================================

    #[test]
    fn test_new_rejects_inverted_rows() {
        let err = ZOrderIndexer32::new(5..=2, 0..=3).unwrap_err();
        assert_eq!(err, ZOrderError::InvalidRange { axis: Axis::Row, min: 5, max: 2 });
        assert_eq!(err.to_string(), "invalid row range: min 5 is greater than max 2");
    }

    #[test]
    fn test_new_rejects_inverted_cols() {
        let err = ZOrderIndexer64::new(0..=3, 70..=66).unwrap_err();
        assert_eq!(err, ZOrderError::InvalidRange { axis: Axis::Col, min: 70, max: 66 });
    }

    #[test]
    fn test_new_unchecked_matches_new_on_valid_bounds() {
        let checked = ZOrderIndexer32::new(2..=13, 66..=76).unwrap();
        let unchecked = ZOrderIndexer32::new_unchecked(2..=13, 66..=76);
        assert_eq!(checked, unchecked);
    }

    #[test]
    fn test_full_key_space() {
        let indexer = ZOrderIndexer16::new(0..=u8::MAX, 0..=u8::MAX).unwrap();
        assert_eq!(indexer.min_z(), 0);
        assert_eq!(indexer.max_z(), u16::MAX);
        assert_eq!(indexer.cell_count(), 1 << 16);
        assert!(indexer.contains(u16::MAX));

        let indexer = ZOrderIndexer128::new(0..=u64::MAX, 0..=u64::MAX).unwrap();
        assert_eq!(indexer.max_z(), u128::MAX);
        assert_eq!(indexer.cell_count(), u128::MAX);
    }

    // ============================================================================
    // CONTAINS TESTS
    // ============================================================================

    #[test]
    fn test_contains_matches_bounds_exhaustive() {
        let indexer = ZOrderIndexer16::new(3..=200, 17..=90).unwrap();
        for row in 0..=u8::MAX {
            for col in 0..=u8::MAX {
                let inside = (3..=200).contains(&row) && (17..=90).contains(&col);
                assert_eq!(
                    indexer.contains(ZOrderIndexer16::key(row, col)),
                    inside,
                    "containment wrong for ({row}, {col})"
                );
            }
        }
    }

    #[test]
    fn test_corner_keys_are_extremes() {
        let indexer = ZOrderIndexer32::new(2..=13, 66..=76).unwrap();
        assert_eq!(indexer.min_z(), 8204);
        assert_eq!(indexer.max_z(), 8433);
        let keys = brute_force(2..=13, 66..=76);
        assert_eq!(keys.first(), Some(&indexer.min_z()));
        assert_eq!(keys.last(), Some(&indexer.max_z()));
    }

    // ============================================================================
    // SCENARIO TESTS
    // ============================================================================

    #[test]
    fn test_square_from_origin() {
        let indexer = ZOrderIndexer32::new(0..=5, 0..=5).unwrap();
        assert_eq!(indexer.min_z(), 0);

        let correct = brute_force(0..=5, 0..=5);
        assert_eq!(correct.len(), 36);
        assert_eq!(walk(&indexer, correct.len()), correct);
        assert_eq!(walk_reference(&indexer), correct);
    }

    #[test]
    fn test_non_square_rectangle() {
        let indexer = ZOrderIndexer32::new(2..=4, 2..=5).unwrap();
        let correct = brute_force(2..=4, 2..=5);
        assert_eq!(correct, [12, 13, 14, 15, 24, 26, 36, 37, 38, 39, 48, 50]);
        assert_eq!(walk(&indexer, correct.len()), correct);
        assert_eq!(walk_reference(&indexer), correct);
    }

    #[test]
    fn test_rectangle_across_many_bits() {
        let indexer = ZOrderIndexer32::new(2..=13, 66..=76).unwrap();
        let correct = brute_force(2..=13, 66..=76);
        assert_eq!(correct.len(), 132);
        assert_eq!(walk(&indexer, correct.len()), correct);
    }

    #[test]
    fn test_oracle_agreement_on_every_key() {
        for (rows, cols) in [(0..=5, 0..=5), (2..=4, 2..=5), (2..=13, 66..=76)] {
            let indexer = ZOrderIndexer32::new(rows.clone(), cols.clone()).unwrap();
            for z in indexer.min_z()..indexer.max_z() {
                assert_eq!(
                    indexer.next_key(z),
                    indexer.next_key_reference(z),
                    "rows {rows:?} cols {cols:?}: mismatch at key {z}"
                );
            }
        }
    }

    #[test]
    fn test_scenarios_independent_of_key_width() {
        let narrow = ZOrderIndexer16::new(2..=13, 66..=76).unwrap();
        let wide = ZOrderIndexer128::new(2..=13, 66..=76).unwrap();
        let expected: Vec<u128> = brute_force(2..=13, 66..=76).into_iter().map(u128::from).collect();

        let narrow_keys: Vec<u128> = narrow.keys().map(|z| u128::from(z.unwrap())).collect();
        let wide_keys: Vec<u128> = wide.keys().collect::<Result<_, _>>().unwrap();
        assert_eq!(narrow_keys, expected);
        assert_eq!(wide_keys, expected);
    }

    #[test]
    fn test_keys_decode_into_rectangle() {
        let indexer = ZOrderIndexer64::new(10..=40, 3..=9).unwrap();
        let mut count = 0u128;
        let mut prev: Option<u64> = None;
        for key in indexer.keys() {
            let key = key.unwrap();
            let (row, col) = ZOrderIndexer64::coords(key);
            assert!((10..=40).contains(&row) && (3..=9).contains(&col), "({row}, {col}) escaped");
            assert!(prev.is_none_or(|p| p < key), "keys not ascending at {key}");
            prev = Some(key);
            count += 1;
        }
        assert_eq!(count, indexer.cell_count());
    }

    // ============================================================================
    // INVARIANT FAILURE TESTS
    // ============================================================================

    #[test]
    fn test_inverted_rectangle_breaks_bound_order() {
        let indexer = ZOrderIndexer16::new_unchecked(5..=2, 0..=0);
        assert_eq!(
            indexer.next_key(10),
            Err(ZOrderError::InternalInvariant { key: 10, reason: "lower bound exceeds upper bound" })
        );
    }

    #[test]
    fn test_key_past_max_has_no_candidate() {
        let indexer = ZOrderIndexer16::new(0..=1, 0..=1).unwrap();
        assert_eq!(
            indexer.next_key(8),
            Err(ZOrderError::InternalInvariant { key: 8, reason: "no candidate before leaving the range" })
        );
    }

    #[test]
    fn test_key_at_max_exhausts_scan() {
        let indexer = ZOrderIndexer16::new(0..=1, 0..=1).unwrap();
        assert_eq!(indexer.max_z(), 3);
        assert_eq!(
            indexer.next_key(3),
            Err(ZOrderError::InternalInvariant { key: 3, reason: "bit scan ended without a candidate" })
        );
    }

    // ============================================================================
    // SHARING TESTS
    // ============================================================================

    #[test]
    fn test_shared_between_threads() {
        let indexer = ZOrderIndexer32::new(2..=13, 66..=76).unwrap();
        let expected = brute_force(2..=13, 66..=76);

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(move || indexer.keys().collect::<Result<Vec<_>, _>>().unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
