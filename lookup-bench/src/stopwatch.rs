//! Accumulating stopwatch.
//!
//! Elapsed time is the sum of all completed start/stop intervals. The
//! stopwatch is either idle or running; starting a running stopwatch or
//! stopping an idle one is rejected instead of silently folding wall-clock
//! time into the total.

use std::fmt;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopwatchError {
    AlreadyRunning,
    NotRunning,
}

impl fmt::Display for StopwatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopwatchError::AlreadyRunning => write!(f, "started while already running"),
            StopwatchError::NotRunning => write!(f, "stopped while idle"),
        }
    }
}

impl std::error::Error for StopwatchError {}

#[derive(Clone, Copy, Debug)]
enum State {
    Idle,
    Running(Instant),
}

#[derive(Clone, Debug)]
pub struct Stopwatch {
    state: State,
    total: Duration,
    laps: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            total: Duration::ZERO,
            laps: 0,
        }
    }

    pub fn start(&mut self) -> Result<(), StopwatchError> {
        match self.state {
            State::Idle => {
                self.state = State::Running(Instant::now());
                Ok(())
            }
            State::Running(_) => Err(StopwatchError::AlreadyRunning),
        }
    }

    /// Close the current interval and return its length.
    pub fn stop(&mut self) -> Result<Duration, StopwatchError> {
        match self.state {
            State::Running(started) => {
                let lap = started.elapsed();
                self.total += lap;
                self.laps += 1;
                self.state = State::Idle;
                Ok(lap)
            }
            State::Idle => Err(StopwatchError::NotRunning),
        }
    }

    /// Time `f` as one interval.
    ///
    /// The interval is always closed, so this cannot leave the stopwatch
    /// running. Calling it on a running stopwatch is rejected.
    #[inline]
    pub fn measure<T>(&mut self, f: impl FnOnce() -> T) -> Result<T, StopwatchError> {
        let State::Idle = self.state else {
            return Err(StopwatchError::AlreadyRunning);
        };
        let started = Instant::now();
        let out = f();
        self.total += started.elapsed();
        self.laps += 1;
        Ok(out)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    /// Sum of completed intervals. An open interval is not included.
    pub fn elapsed(&self) -> Duration {
        self.total
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.total.as_secs_f64()
    }

    /// Number of completed intervals.
    pub fn laps(&self) -> u64 {
        self.laps
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
