use docket_timeline::TimelineError;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for the Docket CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// The tasks file could not be read
    #[error("Failed to read tasks file {path}: {source}")]
    ReadTasks {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tasks file is not valid task JSON
    #[error("Failed to parse tasks file {path}: {source}")]
    ParseTasks {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid timeline configuration
    #[error(transparent)]
    Timeline(#[from] TimelineError),

    /// Output could not be encoded
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;
