//! Error types of the harness.
//!
//! The probing table itself never errors; everything here is harness plumbing.

use std::fmt;
use std::io;

use crate::stopwatch::StopwatchError;

/// Result alias used across the harness.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a benchmark run.
#[derive(Debug)]
pub enum Error {
    /// The run configuration is unusable.
    Config(String),
    /// Console, log file or archive file I/O failed.
    Io(io::Error),
    /// Serializing or deserializing the ordered map archive failed.
    Archive(bincode::Error),
    /// A stopwatch was started twice or stopped while idle.
    Stopwatch(StopwatchError),
    /// A global logger was already installed.
    Logger(log::SetLoggerError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "invalid config: {}", msg),
            Error::Io(err) => write!(f, "io error: {}", err),
            Error::Archive(err) => write!(f, "archive error: {}", err),
            Error::Stopwatch(err) => write!(f, "stopwatch misuse: {}", err),
            Error::Logger(err) => write!(f, "logger setup failed: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(_) => None,
            Error::Io(err) => Some(err),
            Error::Archive(err) => Some(err.as_ref()),
            Error::Stopwatch(err) => Some(err),
            Error::Logger(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Archive(err)
    }
}

impl From<StopwatchError> for Error {
    fn from(err: StopwatchError) -> Self {
        Error::Stopwatch(err)
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Self {
        Error::Logger(err)
    }
}
