//! Log sink setup.
//!
//! Result lines go to an append-only file by default, one record per line:
//!
//! ```text
//! [2026-10-16T09:30:00Z] 0.412 [s], 2427184.5 [items/s], 0.412 [us/item] :read<ProbeTable>
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use env_logger::Target;
use log::LevelFilter;

use crate::error::Result;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "index_lookup.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Append plain `[timestamp] message` lines to a file.
    File(PathBuf),
    /// Colored, timestamped records on stderr.
    Stderr,
}

impl Default for LogSink {
    fn default() -> Self {
        LogSink::File(PathBuf::from(DEFAULT_LOG_FILE))
    }
}

/// Install the global logger at `Info` level.
///
/// Fails if the file cannot be opened or a logger is already installed.
pub fn init(sink: &LogSink) -> Result<()> {
    match sink {
        LogSink::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            pretty_env_logger::formatted_builder()
                .filter_level(LevelFilter::Info)
                .format(|buf, record| {
                    writeln!(buf, "[{}] {}", buf.timestamp_seconds(), record.args())
                })
                .target(Target::Pipe(Box::new(file)))
                .try_init()?;
        }
        LogSink::Stderr => {
            pretty_env_logger::formatted_timed_builder()
                .filter_level(LevelFilter::Info)
                .try_init()?;
        }
    }
    Ok(())
}
