//! Structures under test behind a common insert/lookup surface.
//!
//! Lookup policy differs per structure and is part of what is measured:
//!
//! | Store | Lookup |
//! |---|---|
//! | `BTreeMap<OrderedFloat<f64>, u64>` | epsilon window, see [`crate::epsilon`] |
//! | `HashMap<OrderedFloat<f64>, u64>` | exact key |
//! | [`ProbeTable`] | exact bit pattern |
//! | [`linear_scan`] | one-sided tolerance |

use std::collections::{BTreeMap, HashMap};

use ordered_float::OrderedFloat;
use probemap::ProbeTable;

use crate::epsilon;

/// The ordered baseline, also the archived structure.
pub type OrderedIndex = BTreeMap<OrderedFloat<f64>, u64>;

/// The hashed baseline.
pub type HashedIndex = HashMap<OrderedFloat<f64>, u64>;

/// A key -> index structure the driver can populate and query.
pub trait IndexStore {
    /// Type name used in result labels.
    const NAME: &'static str;

    /// Fresh, empty structure sized for `capacity` items.
    fn with_capacity(capacity: usize) -> Self;

    /// Store one association. `false` means the pair was dropped.
    fn insert(&mut self, key: f64, index: u64) -> bool;

    fn lookup(&self, key: f64, epsilon: f64) -> Option<u64>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IndexStore for OrderedIndex {
    const NAME: &'static str = "BTreeMap<f64, u64>";

    fn with_capacity(_capacity: usize) -> Self {
        BTreeMap::new()
    }

    #[inline]
    fn insert(&mut self, key: f64, index: u64) -> bool {
        BTreeMap::insert(self, OrderedFloat(key), index);
        true
    }

    #[inline]
    fn lookup(&self, key: f64, epsilon: f64) -> Option<u64> {
        epsilon::get_index(self, key, epsilon)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl IndexStore for HashedIndex {
    const NAME: &'static str = "HashMap<f64, u64>";

    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity(capacity)
    }

    #[inline]
    fn insert(&mut self, key: f64, index: u64) -> bool {
        HashMap::insert(self, OrderedFloat(key), index);
        true
    }

    #[inline]
    fn lookup(&self, key: f64, _epsilon: f64) -> Option<u64> {
        self.get(&OrderedFloat(key)).copied()
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl IndexStore for ProbeTable {
    const NAME: &'static str = "ProbeTable";

    fn with_capacity(capacity: usize) -> Self {
        ProbeTable::new(capacity)
    }

    #[inline]
    fn insert(&mut self, key: f64, index: u64) -> bool {
        ProbeTable::insert(self, key, index)
    }

    #[inline]
    fn lookup(&self, key: f64, _epsilon: f64) -> Option<u64> {
        self.get(key)
    }

    fn len(&self) -> usize {
        ProbeTable::len(self)
    }
}

/// Scan `keys` for an entry at or just above `key`.
///
/// Only `key <= ws < key + epsilon` matches; a stored key slightly below the
/// query is not found.
#[inline]
pub fn linear_scan(keys: &[f64], key: f64, epsilon: f64) -> bool {
    keys.iter().any(|&ws| ws >= key && (ws - key) < epsilon)
}
