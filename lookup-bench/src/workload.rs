//! Synthetic timestamp workloads.
//!
//! A workload is two aligned sequences: integer indices and the `f64` keys
//! derived from them. With spacing `k`:
//!
//! - `indices[i] = (k + U(0, k-1)) * i`
//! - `keys[i] = indices[i] + U'(0, k-1) / 10.0002`
//!
//! The per-element multiplier makes indices quasi-monotonic with occasional
//! duplicates, which in turn produces duplicate and colliding keys.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Divisor of the fractional key jitter.
const JITTER_DIVISOR: f64 = 10.0002;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workload {
    pub keys: Vec<f64>,
    pub indices: Vec<i64>,
}

impl Workload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.keys.len(), self.indices.len());
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn max_index(&self) -> Option<i64> {
        self.indices.iter().copied().max()
    }

    /// `(key, index)` pairs with the index reinterpreted as a storage payload.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, u64)> + '_ {
        self.keys
            .iter()
            .zip(self.indices.iter())
            .map(|(&key, &index)| (key, index as u64))
    }
}

/// Something that can (re)fill a [`Workload`] for one trial.
pub trait WorkloadSource {
    /// Replace the contents of `workload` with `size` fresh pairs.
    fn fill(&mut self, size: usize, workload: &mut Workload);
}

/// The randomized generator used by real runs.
#[derive(Debug, Clone)]
pub struct RandomWorkload<R = StdRng> {
    rng: R,
    spacing: u32,
}

impl RandomWorkload<StdRng> {
    /// Seeded from the operating system; not reproducible.
    pub fn from_entropy(spacing: u32) -> Self {
        Self::with_rng(StdRng::from_entropy(), spacing)
    }

    /// Deterministic for a given `seed`.
    pub fn seeded(seed: u64, spacing: u32) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), spacing)
    }
}

impl<R: Rng> RandomWorkload<R> {
    /// # Panics
    ///
    /// Panics if `spacing == 0`.
    pub fn with_rng(rng: R, spacing: u32) -> Self {
        assert!(spacing > 0, "workload spacing must be at least 1");
        Self { rng, spacing }
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }
}

impl<R: Rng> WorkloadSource for RandomWorkload<R> {
    fn fill(&mut self, size: usize, workload: &mut Workload) {
        let k = i64::from(self.spacing);

        workload.indices.clear();
        workload.indices.reserve(size);
        for i in 0..size as i64 {
            let multiplier = k + self.rng.gen_range(0..k);
            workload.indices.push(multiplier * i);
        }

        workload.keys.clear();
        workload.keys.reserve(size);
        for &index in &workload.indices {
            let jitter = self.rng.gen_range(0..k) as f64 / JITTER_DIVISOR;
            workload.keys.push(index as f64 + jitter);
        }
    }
}

/// Replays fixed sequences; used to inject known data into the driver.
#[derive(Debug, Clone)]
pub struct FixedWorkload {
    keys: Vec<f64>,
    indices: Vec<i64>,
}

impl FixedWorkload {
    /// # Panics
    ///
    /// Panics if the sequences differ in length.
    pub fn new(keys: Vec<f64>, indices: Vec<i64>) -> Self {
        assert_eq!(
            keys.len(),
            indices.len(),
            "keys and indices must be aligned"
        );
        Self { keys, indices }
    }

    /// Keys equal to the indices, without jitter.
    pub fn exact(indices: Vec<i64>) -> Self {
        let keys = indices.iter().map(|&i| i as f64).collect();
        Self::new(keys, indices)
    }
}

impl WorkloadSource for FixedWorkload {
    /// Copies at most `size` pairs; a shorter fixed sequence yields a shorter
    /// workload.
    fn fill(&mut self, size: usize, workload: &mut Workload) {
        workload.keys.clear();
        workload.indices.clear();
        workload.keys.extend(self.keys.iter().take(size));
        workload.indices.extend(self.indices.iter().take(size));
    }
}
