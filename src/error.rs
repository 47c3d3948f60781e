//! Error types for costctl
//!
//! Library code uses `crate::error::Result<T>` which returns `CostctlError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling; the
//! conversion happens at the CLI boundary via `anyhow::Error::from` so error
//! chains are preserved.
//!
//! There is deliberately no retry machinery here: a provider failure (auth,
//! throttling, network, missing permission) aborts the report run. Partial
//! output already printed stays on screen and the completion trailer is not
//! emitted.

use thiserror::Error;

/// Main error type for costctl
#[derive(Error, Debug)]
pub enum CostctlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("EC2 error: {0}")]
    Aws(String),

    #[error("CloudWatch error: {0}")]
    CloudWatch(String),

    #[error("RDS error: {0}")]
    Rds(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CostctlError>;
