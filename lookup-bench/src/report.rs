//! Aggregate results of one operation family.

use std::io::Write;
use std::time::Duration;

use crate::error::Result;

/// Smallest elapsed time used for rates.
const MIN_ELAPSED: Duration = Duration::from_nanos(1);

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub label: String,
    /// Trials run.
    pub runs: usize,
    /// Unit operations timed, summed over all trials.
    pub items: usize,
    /// Time spent inside timed sections only.
    pub elapsed: Duration,
    /// Lookups that found nothing.
    pub failures: usize,
    /// Inserts the structure refused.
    pub dropped: usize,
}

impl Measurement {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            runs: 0,
            items: 0,
            elapsed: Duration::ZERO,
            failures: 0,
            dropped: 0,
        }
    }

    /// Timed seconds, never below one nanosecond.
    ///
    /// A coarse clock can sum a handful of short intervals to zero; the floor
    /// keeps the derived rates finite.
    pub fn seconds(&self) -> f64 {
        self.elapsed.max(MIN_ELAPSED).as_secs_f64()
    }

    /// Items per second over all trials.
    pub fn throughput(&self) -> f64 {
        self.items as f64 / self.seconds()
    }

    pub fn micros_per_item(&self) -> f64 {
        1_000_000.0 / self.throughput()
    }

    /// `{secs} [s], {items/s} [items/s], {us} [us/item] :{label}`
    pub fn log_line(&self) -> String {
        format!(
            "{:.3} [s], {:.1} [items/s], {:.3} [us/item] :{}",
            self.seconds(),
            self.throughput(),
            self.micros_per_item(),
            self.label
        )
    }
}

/// Log the result line and finish the console progress line.
pub fn report<W: Write>(m: &Measurement, console: &mut W) -> Result<()> {
    log::info!("{}", m.log_line());
    if m.dropped > 0 {
        log::warn!("{} inserts dropped :{}", m.dropped, m.label);
    }
    writeln!(console, " {}[us/item]", m.micros_per_item())?;
    Ok(())
}
