//! Error types for the enrichment pipeline.

use std::path::PathBuf;

/// Enrichment errors.
///
/// Per-row conditions (non-success HTTP status, empty API responses, rows
/// lacking both company and domain) are not errors; they surface as
/// [`crate::client::LookupOutcome`] / [`crate::enrich::RowOutcome`] values.
/// Everything here aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    /// Configuration error (bad base URL, missing key).
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Input or cache table unreadable or structurally malformed.
    #[error("table error in {path}: {message}")]
    Table { path: PathBuf, message: String },

    /// Network error (connect, timeout, body read).
    #[error("network error: {message}")]
    Network { message: String },

    /// The API returned a 2xx response whose body could not be parsed.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Cache file could not be written.
    #[error("cache error: {message}")]
    Cache { message: String },

    /// IO error (output file write).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EnrichError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Config / input issues
            Self::Config { .. } => 1,
            Self::Table { .. } => 1,
            Self::Io(_) => 1,

            // Network/transient
            Self::Network { .. } => 5,

            // Other
            Self::Cache { .. } => 6,
            Self::InvalidResponse { .. } => 6,
        }
    }
}

impl From<reqwest::Error> for EnrichError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for enrichment operations.
pub type EnrichResult<T> = Result<T, EnrichError>;
