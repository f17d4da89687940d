//! Run configuration.

use crate::error::{Error, Result};

/// Default tolerance of epsilon lookups.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Default index spacing / jitter parameter of the workload generator.
pub const DEFAULT_SPACING: u32 = 10;

/// Parameters of one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Trials per operation family.
    pub runs: usize,
    /// Items per trial; also the probing table capacity.
    pub size: usize,
    /// Percentage of `size` reported as the lookup figure.
    pub percent: u32,
    /// Spacing parameter `k` of the workload generator.
    pub spacing: u32,
    /// Tolerance of the epsilon and linear-scan lookups.
    pub epsilon: f64,
    /// Fixed seed for workload and lookup draws; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            runs: 100,
            size: 10_000,
            percent: 20,
            spacing: DEFAULT_SPACING,
            epsilon: DEFAULT_EPSILON,
            seed: None,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(Error::Config("count must be at least 1".into()));
        }
        if self.size == 0 {
            return Err(Error::Config("size must be at least 1".into()));
        }
        if self.spacing == 0 {
            return Err(Error::Config("spacing must be at least 1".into()));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::Config(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// `percent` of `size`, truncated.
    pub fn lookups(&self) -> usize {
        (f64::from(self.percent) / 100.0 * self.size as f64) as usize
    }

    /// Unit operations timed per family: `runs * size`.
    pub fn total_items(&self) -> usize {
        self.runs * self.size
    }
}
