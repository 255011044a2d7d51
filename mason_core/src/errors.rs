//! # Error Types
//!
//! Structured error types for mason_core. Foreseeable failures (a missing
//! catalog file, an unreachable lookup service) are recovered where they
//! occur and never reach these types; what remains is genuine I/O and
//! serialization trouble plus invalid caller input.
//!
//! ## Example
//!
//! ```rust
//! use mason_core::errors::{MasonError, MasonResult};
//!
//! fn validate_length(length_m: f64) -> MasonResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(MasonError::invalid_input(
//!             "length_m",
//!             length_m.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mason_core operations
pub type MasonResult<T> = Result<T, MasonError>;

/// Structured error type for estimation and persistence operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum MasonError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material not found in the catalog
    #[error("Material not found: {name}")]
    MaterialNotFound { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MasonError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MasonError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(name: impl Into<String>) -> Self {
        MasonError::MaterialNotFound { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MasonError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            MasonError::InvalidInput { .. } => "INVALID_INPUT",
            MasonError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            MasonError::FileError { .. } => "FILE_ERROR",
            MasonError::SerializationError { .. } => "SERIALIZATION_ERROR",
            MasonError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
