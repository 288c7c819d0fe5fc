//! Error types for the transfer lockout engine
//!
//! This module defines all error types that can occur while tracking attempts,
//! processing transfers and replaying submission files.
//!
//! # Error Categories
//!
//! - **Storage Errors**: the session storage medium is unavailable
//! - **Validation Errors**: a required form field is missing or malformed
//! - **Authentication Errors**: demo login rejected
//! - **Replay Errors**: I/O and CSV parsing failures
//!
//! Rejected and blocked transfers are not errors; they are normal
//! [`TransferOutcome`](super::TransferOutcome) values.

use thiserror::Error;

/// Main error type for the lockout engine
///
/// Each variant includes relevant context to help diagnose the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LockoutError {
    /// The session storage medium could not be read or written
    ///
    /// Never recovered locally. Callers must not interpret it as "not blocked".
    #[error("Session storage unavailable: {reason}")]
    StorageUnavailable {
        /// Description of the storage failure
        reason: String,
    },

    /// A transfer form field is missing or invalid
    ///
    /// Raised before the processor runs; the attempt counter is untouched.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: String,
        /// Description of the problem
        message: String,
    },

    /// Demo login attempted with an empty email or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped
    /// and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to LockoutError
impl From<std::io::Error> for LockoutError {
    fn from(error: std::io::Error) -> Self {
        LockoutError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LockoutError
impl From<csv::Error> for LockoutError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LockoutError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LockoutError {
    /// Create a StorageUnavailable error
    pub fn storage_unavailable(reason: impl Into<String>) -> Self {
        LockoutError::StorageUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a Validation error
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        LockoutError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Create a Validation error for a missing required field
    pub fn missing_field(field: &str) -> Self {
        Self::validation(field, "field is required")
    }

    /// Whether this error comes from the storage boundary
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, LockoutError::StorageUnavailable { .. })
    }
}
