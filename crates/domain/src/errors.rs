//! Error types shared across the SDK crates

use thiserror::Error;

/// Domain-level error for configuration problems
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, SdkError>;
