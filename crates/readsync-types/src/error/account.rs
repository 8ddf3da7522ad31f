//! Account-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum AccountError {
    /// Account with given ID not found
    #[error("Account not found: {id}")]
    NotFound {
        /// Unique identifier of the missing account
        id: String,
    },

    /// No eligible account exists right now (none enabled, or every
    /// enabled account is quarantined for the current day)
    #[error("Account pool exhausted: {reason}")]
    PoolExhausted {
        /// Explanation of why no accounts are available
        reason: String,
    },

    /// Account storage/filesystem error
    #[error("Account storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },

    /// Account validation error (e.g., empty token)
    #[error("Validation error for {field}: {message}")]
    Validation {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl AccountError {
    /// Check if this is a temporary error that may resolve without operator
    /// intervention (the pool refills at day rollover or via login).
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::PoolExhausted { .. })
    }

    /// Get HTTP status code for this error.
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::PoolExhausted { .. } => 503,
            Self::Storage { .. } => 500,
            Self::Validation { .. } => 400,
        }
    }
}
