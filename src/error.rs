//! Error types for the schema tools

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema tool operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema tool errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot classify schema at {pointer}: {reason}")]
    UnclassifiedShape { pointer: String, reason: String },

    #[error("{} is out of date", .path.display())]
    Stale { path: PathBuf },
}

impl SchemaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
