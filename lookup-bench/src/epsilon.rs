//! Tolerance-based point lookup over ordered maps.
//!
//! Generated keys carry fractional jitter, so a query is matched against the
//! closed window `[target - epsilon, target + epsilon]` using the map's own
//! range primitive rather than a scan.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use ordered_float::OrderedFloat;

pub use crate::config::DEFAULT_EPSILON;

/// Ordered associative collaborator keyed by `f64`.
pub trait RangeLookup {
    type Value;

    /// First entry whose key lies in `window`, in key order.
    fn first_in(&self, window: RangeInclusive<f64>) -> Option<(f64, &Self::Value)>;
}

impl<V> RangeLookup for BTreeMap<OrderedFloat<f64>, V> {
    type Value = V;

    #[inline]
    fn first_in(&self, window: RangeInclusive<f64>) -> Option<(f64, &V)> {
        let (lo, hi) = window.into_inner();
        // Also rejects NaN bounds.
        if !matches!(lo.partial_cmp(&hi), Some(Ordering::Less | Ordering::Equal)) {
            return None;
        }
        self.range(OrderedFloat(lo)..=OrderedFloat(hi))
            .next()
            .map(|(k, v)| (k.into_inner(), v))
    }
}

/// Entries whose key lies within `epsilon` of `target`, as a closed window.
#[inline]
pub fn window(target: f64, epsilon: f64) -> RangeInclusive<f64> {
    (target - epsilon)..=(target + epsilon)
}

/// Value of the first entry within `epsilon` of `target`.
#[inline]
pub fn get_index<M>(map: &M, target: f64, epsilon: f64) -> Option<M::Value>
where
    M: RangeLookup,
    M::Value: Copy,
{
    map.first_in(window(target, epsilon)).map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(f64, u64)]) -> BTreeMap<OrderedFloat<f64>, u64> {
        pairs.iter().map(|&(k, v)| (OrderedFloat(k), v)).collect()
    }

    #[test]
    fn test_within_tolerance_is_found() {
        let map = map_of(&[(100.0, 7)]);
        assert_eq!(get_index(&map, 100.0 + 0.5e-6, DEFAULT_EPSILON), Some(7));
        assert_eq!(get_index(&map, 100.0 - 0.5e-6, DEFAULT_EPSILON), Some(7));
        assert_eq!(get_index(&map, 100.0, DEFAULT_EPSILON), Some(7));
    }

    #[test]
    fn test_outside_tolerance_is_missed() {
        let map = map_of(&[(100.0, 7)]);
        assert_eq!(get_index(&map, 100.0 + 2e-6, DEFAULT_EPSILON), None);
        assert_eq!(get_index(&map, 100.0 - 2e-6, DEFAULT_EPSILON), None);
    }

    #[test]
    fn test_returns_lowest_key_in_window() {
        let map = map_of(&[(1.0, 1), (1.0 + 4e-7, 2), (1.0 + 8e-7, 3)]);
        assert_eq!(get_index(&map, 1.0 + 4e-7, DEFAULT_EPSILON), Some(1));
        assert_eq!(
            map.first_in(window(1.0 + 1.5e-6, DEFAULT_EPSILON)),
            Some((1.0 + 8e-7, &3))
        );
    }

    #[test]
    fn test_jittered_workload_keys() {
        let map = map_of(&[(0.0, 0), (10.29994, 10), (20.59988, 20)]);
        assert_eq!(get_index(&map, 10.29994, DEFAULT_EPSILON), Some(10));
        assert_eq!(get_index(&map, 10.3, DEFAULT_EPSILON), None);
        assert_eq!(get_index(&map, 10.3, 1e-3), Some(10));
    }

    #[test]
    fn test_empty_and_degenerate_windows() {
        let empty: BTreeMap<OrderedFloat<f64>, u64> = BTreeMap::new();
        assert_eq!(get_index(&empty, 1.0, DEFAULT_EPSILON), None);

        let map = map_of(&[(1.0, 1)]);
        assert_eq!(get_index(&map, f64::NAN, DEFAULT_EPSILON), None);
        assert_eq!(map.first_in(2.0..=1.0), None);
    }
}
