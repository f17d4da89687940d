//! # probemap
//!
//! A fixed-capacity open-addressing map from `f64` timestamps to `u64` indices.
//!
//! Collisions are resolved by linear probing (`+1 mod capacity`). The table
//! never grows and never deletes: it is built once, filled, queried and then
//! dropped, which lets every probe chain end at the first empty slot without
//! tombstone bookkeeping.
//!
//! Keys are compared bit-for-bit. `0.1 + 0.2` does not find `0.3`, and `-0.0`
//! is a different key than `0.0`.
//!
//! ## Example
//!
//! ```rust
//! use probemap::ProbeTable;
//!
//! let mut table = ProbeTable::new(4);
//! assert!(table.insert(1.5, 10));
//! assert!(table.insert(2.5, 20));
//!
//! assert_eq!(table.get(1.5), Some(10));
//! assert_eq!(table.get(2.5), Some(20));
//! assert_eq!(table.get(3.5), None);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

use std::fmt;
use std::hash::{BuildHasher, Hasher};

// =============================================================================
// Hashing
// =============================================================================

/// 64-bit finalizer of MurmurHash3.
#[inline]
pub fn fmix64(mut v: u64) -> u64 {
    v ^= v >> 33;
    v = v.wrapping_mul(0xff51afd7ed558ccd);
    v ^= v >> 33;
    v = v.wrapping_mul(0xc4ceb9fe1a85ec53);
    v ^= v >> 33;
    v
}

/// Hasher that scrambles the written words with [`fmix64`].
///
/// The table writes exactly one word per key (the key's bit pattern), in which
/// case `finish` is `fmix64(bits)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fmix64Hasher {
    state: u64,
}

impl Hasher for Fmix64Hasher {
    #[inline]
    fn finish(&self) -> u64 {
        fmix64(self.state)
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.write_u64(u64::from_le_bytes(word));
        }
    }

    #[inline]
    fn write_u64(&mut self, v: u64) {
        self.state = self.state.rotate_left(31) ^ v;
    }
}

/// Default [`BuildHasher`] of [`ProbeTable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildFmix64;

impl BuildHasher for BuildFmix64 {
    type Hasher = Fmix64Hasher;

    #[inline]
    fn build_hasher(&self) -> Fmix64Hasher {
        Fmix64Hasher::default()
    }
}

// =============================================================================
// Slots
// =============================================================================

/// One storage unit of a [`ProbeTable`].
///
/// Emptiness is its own variant, so every `u64` is a valid payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slot {
    Empty,
    Occupied { key: f64, value: u64 },
}

impl Slot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

#[inline]
fn next_slot(idx: usize, capacity: usize) -> usize {
    let next = idx + 1;
    if next == capacity {
        0
    } else {
        next
    }
}

#[inline]
fn same_key(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits()
}

// =============================================================================
// ProbeTable
// =============================================================================

/// Fixed-capacity linear-probing table keyed by `f64`.
///
/// - `insert` never compares keys: inserting a key twice stores it twice, and
///   `get` returns the value of the first copy.
/// - Both operations visit at most `capacity` slots.
/// - A failed insert (table full) is reported by returning `false`; the pair
///   is dropped.
pub struct ProbeTable<S = BuildFmix64> {
    slots: Vec<Slot>,
    len: usize,
    hasher: S,
}

impl ProbeTable {
    /// Create a table of `capacity` empty slots using [`BuildFmix64`].
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, BuildFmix64)
    }
}

impl<S: BuildHasher> ProbeTable<S> {
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            slots: vec![Slot::Empty; capacity],
            len: 0,
            hasher,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn memory_usage(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Slot>()
    }

    /// Home slot of `key`: `hash64(key) mod capacity`.
    ///
    /// Must not be called on a zero-capacity table.
    #[inline]
    fn home(&self, key: f64) -> usize {
        debug_assert!(!self.slots.is_empty());
        let mut h = self.hasher.build_hasher();
        h.write_u64(key.to_bits());
        (h.finish() % self.slots.len() as u64) as usize
    }

    /// Store `(key, value)` in the first empty slot at or after the key's home.
    ///
    /// Returns `false` when all `capacity` slots were visited without finding
    /// an empty one.
    pub fn insert(&mut self, key: f64, value: u64) -> bool {
        let capacity = self.slots.len();
        if capacity == 0 {
            return false;
        }

        let mut idx = self.home(key);
        for _ in 0..capacity {
            if self.slots[idx].is_empty() {
                self.slots[idx] = Slot::Occupied { key, value };
                self.len += 1;
                return true;
            }
            idx = next_slot(idx, capacity);
        }
        false
    }

    fn find(&self, key: f64) -> Option<(usize, u64)> {
        let capacity = self.slots.len();
        if capacity == 0 {
            return None;
        }

        let mut idx = self.home(key);
        for _ in 0..capacity {
            match self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied { key: k, value } if same_key(k, key) => return Some((idx, value)),
                Slot::Occupied { .. } => {}
            }
            idx = next_slot(idx, capacity);
        }
        None
    }

    /// Value stored for the first slot whose key equals `key` bit-for-bit.
    #[inline]
    pub fn get(&self, key: f64) -> Option<u64> {
        self.find(key).map(|(_, value)| value)
    }

    /// Slot index holding `key`, as `get` would find it.
    pub fn position(&self, key: f64) -> Option<usize> {
        self.find(key).map(|(idx, _)| idx)
    }

    pub fn contains_key(&self, key: f64) -> bool {
        self.find(key).is_some()
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
        }
    }
}

impl<S: BuildHasher> fmt::Debug for ProbeTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

pub struct Iter<'a> {
    slots: std::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (f64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { key, value } = *slot {
                return Some((key, value));
            }
        }
        None
    }
}


#[cfg(test)]
mod proptests;
