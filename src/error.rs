//! Error types for Engram

use thiserror::Error;

/// Main error type for the memory manager
#[derive(Error, Debug)]
pub enum MemoryError {
    /// Configuration error (zero capacity, negative rate, non-finite weight)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MemoryError>;
