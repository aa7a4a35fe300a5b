//! Error types for the evidence-triage library.
//!
//! Malformed or hostile *content* is never an error: it maps to a quality
//! verdict on the result record. Errors here cover only caller-side faults
//! (unreadable input, size limits, serialization of the result record).

use thiserror::Error;

/// Main error type for evidence-triage operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input exceeds the configured size limit
    #[error("File too large: {size} bytes (limit: {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    /// Invalid input supplied by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for evidence-triage operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
