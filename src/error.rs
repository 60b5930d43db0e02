//! Error types for the rankfuse library.
//!
//! Every fallible operation returns [`Result`], whose error side is the
//! [`RankFuseError`] enum. Fusion itself only fails on bad input: a
//! non-positive fusion constant, a negative result limit, or a document
//! reference without an identifier.
//!
//! # Examples
//!
//! ```
//! use rankfuse::error::{RankFuseError, Result};
//!
//! fn check_constant(k: f64) -> Result<()> {
//!     if k <= 0.0 {
//!         return Err(RankFuseError::invalid_config("fusion constant must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_constant(60.0).is_ok());
//! assert!(check_constant(0.0).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for rankfuse operations.
#[derive(Error, Debug)]
pub enum RankFuseError {
    /// Fusion parameters are out of range (non-positive `k`, negative limit).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A ranked result set contains a document that cannot be fused.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An upstream result provider failed to produce its ranked list.
    #[error("Retriever error: {0}")]
    Retriever(String),

    /// I/O errors (reading result or config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with RankFuseError.
pub type Result<T> = std::result::Result<T, RankFuseError>;

impl RankFuseError {
    /// Create a new invalid configuration error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        RankFuseError::InvalidConfiguration(msg.into())
    }

    /// Create a new malformed input error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        RankFuseError::MalformedInput(msg.into())
    }

    /// Create a new retriever error.
    pub fn retriever<S: Into<String>>(msg: S) -> Self {
        RankFuseError::Retriever(msg.into())
    }
}
