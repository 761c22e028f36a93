//! Custom error types for group-ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for group-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Bad user-supplied input (amounts, participant lists, selectors)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A stored ledger row could not be interpreted
    #[error("Data integrity error at ledger line {line}: {reason}")]
    DataIntegrity { line: usize, reason: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Create a "not found" error for a group's category set
    pub fn categories_not_found(group: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category set for group",
            identifier: group.into(),
        }
    }

    /// Create a "not found" error for a reporting window selector
    pub fn window_not_found(selector: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Reporting window",
            identifier: selector.into(),
        }
    }

    /// Create a data integrity error for a ledger line
    pub fn data_integrity(line: usize, reason: impl Into<String>) -> Self {
        Self::DataIntegrity {
            line,
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a data integrity error
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::DataIntegrity { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for group-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
