//! # lookup-bench
//!
//! Insert and lookup latency of `f64` timestamp key -> index structures.
//!
//! ## Structures
//!
//! - **`BTreeMap`**: ordered baseline, queried with an epsilon window
//! - **`HashMap`**: hashed baseline, exact lookup
//! - **Linear scan**: worst case, every lookup walks the raw keys
//! - **[`ProbeTable`]**: fixed-capacity linear-probing table
//! - **Archive**: `bincode` round trips of the ordered baseline
//!
//! ## Measurement
//!
//! Each operation family runs a number of trials. A trial generates a fresh
//! workload, builds a fresh structure, and times only the unit operation.
//! Timed intervals of all trials are summed and reported as seconds,
//! items per second and microseconds per item.
//!
//! ## Example
//!
//! ```rust
//! use lookup_bench::{BenchConfig, Driver, FixedWorkload};
//! use rand::SeedableRng;
//!
//! let config = BenchConfig { runs: 1, size: 5, ..BenchConfig::default() };
//! let workload = FixedWorkload::exact(vec![0, 10, 20, 30, 40]);
//! let rng = rand::rngs::StdRng::seed_from_u64(0);
//! let mut driver = Driver::new(config, workload, rng, std::io::sink());
//!
//! let m = driver.read::<probemap::ProbeTable>().unwrap();
//! assert_eq!(m.failures, 0);
//! assert!(m.throughput() > 0.0);
//! ```

#![warn(clippy::all)]

pub mod archive;
pub mod config;
pub mod driver;
pub mod epsilon;
pub mod error;
pub mod logging;
pub mod report;
pub mod stopwatch;
pub mod store;
pub mod workload;

pub use config::BenchConfig;
pub use driver::{Driver, Family, Store};
pub use error::{Error, Result};
pub use probemap::ProbeTable;
pub use report::Measurement;
pub use stopwatch::Stopwatch;
pub use store::IndexStore;
pub use workload::{FixedWorkload, RandomWorkload, Workload, WorkloadSource};
