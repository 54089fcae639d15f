//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the matching engine, providing structured
//! error types and conversion utilities for all system components.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from various system components
//! - **Output**: Structured error types with context
//! - **Error Categories**: Request, Data, Computation, Configuration, Storage
//!
//! Note the taxonomy boundary: an empty or whitespace-only query is *not* an
//! error. Scorers treat it as zero-signal input and return 0.0 similarity
//! everywhere; the decision policy then falls back to a generic response or an
//! empty recommendation list.

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, MatchError>;

/// Error types for the matching engine
#[derive(Debug, Error)]
pub enum MatchError {
    /// Malformed or out-of-range request payload
    #[error("invalid request: {details}")]
    InvalidRequest { details: String },

    /// Candidate store unreachable at construction or refresh time.
    /// Recoverable: the caller may fall back to the built-in candidate set.
    #[error("candidate store '{store}' is unavailable: {details}")]
    DataUnavailable { store: String, details: String },

    /// Degenerate scoring case (e.g. a category with fewer than two
    /// documents). Skipped per category, never aborts a whole ranking pass.
    #[error("computation skipped: {details}")]
    Computation { details: String },

    /// Configuration loading or validation errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Serialization/deserialization errors
    #[error("serialization failed: {message}")]
    Serialization { message: String },

    /// Embedded database errors
    #[error("database error: {0}")]
    Database(#[from] sled::Error),

    /// Internal system errors
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl MatchError {
    /// Check if the error is recoverable by degrading gracefully
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MatchError::DataUnavailable { .. } | MatchError::Computation { .. }
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            MatchError::InvalidRequest { .. } => "request",
            MatchError::DataUnavailable { .. } | MatchError::Database(_) => "storage",
            MatchError::Computation { .. } => "scoring",
            MatchError::Config { .. } | MatchError::ValidationFailed { .. } => "configuration",
            MatchError::Serialization { .. } => "serialization",
            MatchError::Internal { .. } => "generic",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for MatchError {
    fn from(err: std::io::Error) -> Self {
        MatchError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        MatchError::Serialization {
            message: format!("JSON serialization error: {}", err),
        }
    }
}

impl From<bincode::Error> for MatchError {
    fn from(err: bincode::Error) -> Self {
        MatchError::Serialization {
            message: format!("Binary serialization error: {}", err),
        }
    }
}

impl From<toml::de::Error> for MatchError {
    fn from(err: toml::de::Error) -> Self {
        MatchError::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}
