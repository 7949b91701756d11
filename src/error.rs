//! Error types for meteoindex
//!
//! Provides a unified error type for all store operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::temporal::TemporalKey;

/// Result type alias using MeteoError
pub type Result<T> = std::result::Result<T, MeteoError>;

/// Unified error type for meteoindex operations
#[derive(Debug, Error)]
pub enum MeteoError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Indexing Errors
    // -------------------------------------------------------------------------
    #[error("Malformed timestamp on line {line}: {reason}")]
    MalformedTimestamp { line: usize, reason: String },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("No observation at {0}")]
    KeyNotFound(TemporalKey),

    #[error("No observations between {from} and {to}")]
    EmptyRange { from: TemporalKey, to: TemporalKey },

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Cannot decode field '{field}' at offset {offset}: {token:?}")]
    Decode {
        offset: u64,
        field: &'static str,
        token: String,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
