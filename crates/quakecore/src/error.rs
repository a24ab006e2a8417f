use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a whole load. Individual bad catalog lines are
/// reported as [`LineError`] and skipped instead.
#[derive(Debug, Error)]
pub enum QuakeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("catalog contains no valid records ({skipped} lines skipped)")]
    EmptyCatalog { skipped: usize },
}

/// Why a single catalog line was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date/time `{0}`")]
    InvalidDate(String),

    #[error("invalid {field} `{value}`")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} {value} out of range")]
    OutOfRange { field: &'static str, value: f32 },
}
