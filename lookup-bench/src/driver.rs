//! Benchmark driver.
//!
//! Every operation family runs `runs` trials. A trial refills the workload,
//! builds a fresh structure and times only the unit operation under test
//! (one insert, one lookup, one archive call). Timed intervals of all trials
//! accumulate into a single [`Measurement`] per family.

use std::hint::black_box;
use std::io::{self, Stdout, Write};

use probemap::ProbeTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::archive;
use crate::config::BenchConfig;
use crate::error::Result;
use crate::report::{report, Measurement};
use crate::stopwatch::Stopwatch;
use crate::store::{linear_scan, HashedIndex, IndexStore, OrderedIndex};
use crate::workload::{RandomWorkload, Workload, WorkloadSource};

/// Structures with an insert and a read family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Store {
    Ordered,
    Hashed,
    Probe,
}

impl Store {
    pub fn name(self) -> &'static str {
        match self {
            Store::Ordered => <OrderedIndex as IndexStore>::NAME,
            Store::Hashed => <HashedIndex as IndexStore>::NAME,
            Store::Probe => <ProbeTable as IndexStore>::NAME,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    Insert(Store),
    Read(Store),
    ReadVector,
    Serialize,
    Deserialize,
}

impl Family {
    /// Order in which a full run executes the families.
    pub const DEFAULT_SEQUENCE: [Family; 9] = [
        Family::Insert(Store::Ordered),
        Family::ReadVector,
        Family::Read(Store::Ordered),
        Family::Insert(Store::Hashed),
        Family::Read(Store::Hashed),
        Family::Insert(Store::Probe),
        Family::Read(Store::Probe),
        Family::Serialize,
        Family::Deserialize,
    ];

    pub fn label(self) -> String {
        match self {
            Family::Insert(store) => format!("insert<{}>", store.name()),
            Family::Read(store) => format!("read<{}>", store.name()),
            Family::ReadVector => "read_vector".to_string(),
            Family::Serialize => format!("serialize<{}>", Store::Ordered.name()),
            Family::Deserialize => format!("deserialize<{}>", Store::Ordered.name()),
        }
    }
}

fn note_failure<O: Write>(console: &mut O, msg: &str) -> Result<()> {
    writeln!(console, "{}", msg)?;
    log::error!("{}", msg);
    Ok(())
}

pub struct Driver<W, R = StdRng, O = Stdout> {
    config: BenchConfig,
    source: W,
    rng: R,
    console: O,
    workload: Workload,
    positions: Vec<usize>,
}

impl Driver<RandomWorkload, StdRng, Stdout> {
    /// Random workloads and lookups, seeded from `config.seed` when set,
    /// progress on stdout.
    pub fn from_config(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        let (source, rng) = match config.seed {
            Some(seed) => (
                RandomWorkload::seeded(seed, config.spacing),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (
                RandomWorkload::from_entropy(config.spacing),
                StdRng::from_entropy(),
            ),
        };
        Ok(Self::new(config, source, rng, io::stdout()))
    }
}

impl<W, R, O> Driver<W, R, O>
where
    W: WorkloadSource,
    R: Rng,
    O: Write,
{
    pub fn new(config: BenchConfig, source: W, rng: R, console: O) -> Self {
        Self {
            config,
            source,
            rng,
            console,
            workload: Workload::new(),
            positions: Vec::new(),
        }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn into_console(self) -> O {
        self.console
    }

    fn next_trial(&mut self) {
        self.source.fill(self.config.size, &mut self.workload);
    }

    /// One uniformly random lookup position per workload item.
    fn draw_positions(&mut self) {
        let n = self.workload.len();
        self.positions.clear();
        if n == 0 {
            return;
        }
        let rng = &mut self.rng;
        self.positions.extend((0..n).map(|_| rng.gen_range(0..n)));
    }

    fn end_trial(&mut self) -> Result<()> {
        write!(self.console, "#")?;
        self.console.flush()?;
        Ok(())
    }

    /// Fill a fresh `S` from the current workload, untimed.
    ///
    /// Returns the store and the number of refused inserts.
    fn populate<S: IndexStore>(&self) -> (S, usize) {
        let mut store = S::with_capacity(self.config.size);
        let dropped = self
            .workload
            .pairs()
            .filter(|&(key, index)| !store.insert(key, index))
            .count();
        (store, dropped)
    }

    pub fn insert<S: IndexStore>(&mut self) -> Result<Measurement> {
        let mut m = Measurement::new(format!("insert<{}>", S::NAME));
        let mut sw = Stopwatch::new();

        for _ in 0..self.config.runs {
            self.next_trial();
            let mut store = S::with_capacity(self.config.size);
            let mut dropped = 0;
            for (key, index) in self.workload.pairs() {
                let accepted = sw.measure(|| store.insert(key, index))?;
                if !accepted {
                    dropped += 1;
                }
            }
            if dropped > 0 {
                log::warn!(
                    "{} of {} inserts dropped in trial {} :{}",
                    dropped,
                    self.workload.len(),
                    m.runs,
                    m.label
                );
            }
            black_box(&store);

            m.runs += 1;
            m.items += self.workload.len();
            m.dropped += dropped;
            self.end_trial()?;
        }

        m.elapsed = sw.elapsed();
        Ok(m)
    }

    pub fn read<S: IndexStore>(&mut self) -> Result<Measurement> {
        let mut m = Measurement::new(format!("read<{}>", S::NAME));
        let mut sw = Stopwatch::new();
        let epsilon = self.config.epsilon;

        for _ in 0..self.config.runs {
            self.next_trial();
            let (store, dropped) = self.populate::<S>();
            self.draw_positions();

            for &pos in &self.positions {
                let key = self.workload.keys[pos];
                let found = sw.measure(|| store.lookup(key, epsilon))?;
                if black_box(found).is_none() {
                    m.failures += 1;
                    note_failure(&mut self.console, "Failure read")?;
                }
            }

            m.runs += 1;
            m.items += self.positions.len();
            m.dropped += dropped;
            self.end_trial()?;
        }

        m.elapsed = sw.elapsed();
        Ok(m)
    }

    /// Worst-case baseline: every lookup scans the raw key sequence.
    pub fn read_vector(&mut self) -> Result<Measurement> {
        let mut m = Measurement::new(Family::ReadVector.label());
        let mut sw = Stopwatch::new();
        let epsilon = self.config.epsilon;

        for _ in 0..self.config.runs {
            self.next_trial();
            self.draw_positions();

            let keys = &self.workload.keys;
            for &pos in &self.positions {
                let key = keys[pos];
                let found = sw.measure(|| linear_scan(keys, key, epsilon))?;
                if !black_box(found) {
                    m.failures += 1;
                    note_failure(&mut self.console, "Failure read vector")?;
                }
            }

            m.runs += 1;
            m.items += self.positions.len();
            self.end_trial()?;
        }

        m.elapsed = sw.elapsed();
        Ok(m)
    }

    /// Times one archive write of the populated ordered map per trial.
    pub fn serialize(&mut self) -> Result<Measurement> {
        let mut m = Measurement::new(Family::Serialize.label());
        let mut sw = Stopwatch::new();

        for _ in 0..self.config.runs {
            self.next_trial();
            let (map, _) = self.populate::<OrderedIndex>();
            let bytes = sw.measure(|| archive::to_bytes(&map))??;
            black_box(bytes);

            m.runs += 1;
            m.items += map.len();
            self.end_trial()?;
        }

        m.elapsed = sw.elapsed();
        Ok(m)
    }

    /// Times one archive read per trial; the archive itself is built untimed.
    pub fn deserialize(&mut self) -> Result<Measurement> {
        let mut m = Measurement::new(Family::Deserialize.label());
        let mut sw = Stopwatch::new();

        for _ in 0..self.config.runs {
            self.next_trial();
            let (map, _) = self.populate::<OrderedIndex>();
            let bytes = archive::to_bytes(&map)?;
            let restored = sw.measure(|| archive::from_bytes(&bytes))??;
            if restored != map {
                m.failures += 1;
                note_failure(&mut self.console, "Failure deserialize")?;
            }

            m.runs += 1;
            m.items += map.len();
            self.end_trial()?;
        }

        m.elapsed = sw.elapsed();
        Ok(m)
    }

    pub fn run(&mut self, family: Family) -> Result<Measurement> {
        match family {
            Family::Insert(Store::Ordered) => self.insert::<OrderedIndex>(),
            Family::Insert(Store::Hashed) => self.insert::<HashedIndex>(),
            Family::Insert(Store::Probe) => self.insert::<ProbeTable>(),
            Family::Read(Store::Ordered) => self.read::<OrderedIndex>(),
            Family::Read(Store::Hashed) => self.read::<HashedIndex>(),
            Family::Read(Store::Probe) => self.read::<ProbeTable>(),
            Family::ReadVector => self.read_vector(),
            Family::Serialize => self.serialize(),
            Family::Deserialize => self.deserialize(),
        }
    }

    /// Run `families` in order, reporting each result as it completes.
    pub fn run_sequence(&mut self, families: &[Family]) -> Result<Vec<Measurement>> {
        let mut results = Vec::with_capacity(families.len());
        for &family in families {
            writeln!(self.console, "Running {} ...", family.label())?;
            let m = self.run(family)?;
            report(&m, &mut self.console)?;
            results.push(m);
        }
        Ok(results)
    }

    pub fn run_all(&mut self) -> Result<Vec<Measurement>> {
        self.run_sequence(&Family::DEFAULT_SEQUENCE)
    }
}
