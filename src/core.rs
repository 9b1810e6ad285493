use std::fmt;

use thiserror::Error;

use crate::env::EnvError;

/// Errors raised by the worker and its components
///
/// `Io`, `Database` and `Config` are fatal and end the run. `Network`,
/// `Timeout` and `Parse` only ever describe a single failed translation and
/// are absorbed by the translator client.
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("malformed response: {0}")]
    Parse(String),
}

impl From<EnvError> for WorkerError {
    fn from(error: EnvError) -> Self {
        WorkerError::Config(error.to_string())
    }
}

impl From<reqwest::Error> for WorkerError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            WorkerError::Timeout(error.to_string())
        } else if error.is_decode() {
            WorkerError::Parse(error.to_string())
        } else {
            WorkerError::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for WorkerError {
    fn from(error: serde_json::Error) -> Self {
        WorkerError::Parse(error.to_string())
    }
}

pub type WorkerResult<T> = Result<T, WorkerError>;

/// Outcome of one worker run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines drained from the pending file
    pub pending: usize,
    /// Pairs written to the cache
    pub translated: usize,
    /// Lines that produced no translation
    pub failed: usize,
}

impl RunSummary {
    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} pending, {} translated, {} failed",
            self.pending, self.translated, self.failed
        )
    }
}

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}
