use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures at the edges of the pipeline: reading the log, writing results.
///
/// Parsing, counting and classifying never fail; a line that matches nothing
/// simply contributes nothing.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("could not open log file '{}': {source}", path.display())]
    OpenLog { path: PathBuf, source: io::Error },

    #[error("failed reading log at line {line}: {source}")]
    ReadLog { line: usize, source: io::Error },

    #[error("invalid failed-login pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("failed to write CSV output '{}': {source}", path.display())]
    WriteCsv { path: PathBuf, source: csv::Error },

    #[error("failed to write JSON output '{}': {source}", path.display())]
    WriteJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error on '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
