//! Error types for rolegrant
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::LoadError;

/// Result type alias for rolegrant operations
pub type GrantResult<T> = Result<T, GrantError>;

/// Main error type for rolegrant operations
#[derive(Error, Debug)]
pub enum GrantError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The permission forest document is not usable at all
    #[error("invalid permission forest: {message}")]
    InvalidForest { message: String },

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Toggle script line could not be parsed
    #[error("invalid toggle script at line {line}: {message}")]
    InvalidScript { line: usize, message: String },

    /// Resource loader rejected a lazy load
    #[error(transparent)]
    ResourceLoad(#[from] LoadError),
}
