//! Typed errors for the ETL library.
//!
//! The library returns `EtlError`; the binary wraps it in `anyhow` at the
//! boundary.

use std::time::Duration;

use thiserror::Error;

use crate::staging::ArtifactState;

/// Errors that can occur while running a pipeline stage.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Object key does not exist in the store
    #[error("object not found: {key}")]
    NotFound { key: String },

    /// Key escapes the store root or is otherwise unusable
    #[error("invalid object key: {key}")]
    InvalidKey { key: String },

    /// Backend storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Local filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Listing site answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Page is missing the containers the parser relies on
    #[error("malformed listing page {page}: {reason}")]
    MalformedPage { page: u32, reason: String },

    /// Price text has no usable digits
    #[error("unparseable price: {value:?}")]
    PriceParse { value: String },

    /// Price digits do not fit a 64-bit integer
    #[error("price out of range: {value:?}")]
    PriceOverflow { value: String },

    /// Dataset could not be encoded/decoded
    #[error("dataset codec error: {0}")]
    Codec(#[from] csv::Error),

    /// Relational sink failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Value does not fit the destination column type
    #[error("value {value} out of range for column {column}")]
    ValueOutOfRange { column: &'static str, value: i64 },

    /// Table name is not a plain SQL identifier
    #[error("invalid table name: {0}")]
    InvalidTableName(String),

    /// Key sensor gave up waiting for an upstream artifact
    #[error("timed out after {waited:?} waiting for {pattern}")]
    SensorTimeout { pattern: String, waited: Duration },

    /// Artifact lifecycle violation
    #[error("invalid artifact transition {from:?} -> {to:?} for {key}")]
    InvalidTransition {
        key: String,
        from: ArtifactState,
        to: ArtifactState,
    },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for ETL operations.
pub type Result<T> = std::result::Result<T, EtlError>;

impl EtlError {
    /// Wrap a backend error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}
