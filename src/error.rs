//! Error types for promptd.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading profiles or serving a request.
#[derive(Debug, Error)]
pub enum Error {
    /// A profile file could not be read from disk.
    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A profile file is not valid YAML for the expected shape.
    #[error("cannot parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A profile directory could not be listed.
    #[error("cannot list config directory {path}: {source}")]
    ConfigDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No model was requested and the model path is empty.
    #[error("no model specified and no models available")]
    NoModel,

    /// The model directory could not be listed.
    #[error("cannot list models: {0}")]
    ModelList(#[source] anyhow::Error),

    /// A cut-string is not a valid regular expression.
    #[error("invalid cut-string pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The inference engine failed to start or to produce a sample.
    #[error("inference failed: {0}")]
    Inference(#[source] anyhow::Error),

    /// A blocking request task panicked or was cancelled.
    #[error("request task failed: {0}")]
    Task(String),
}

/// Result type for promptd operations.
pub type Result<T> = std::result::Result<T, Error>;
