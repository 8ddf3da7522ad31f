//! Repository (feeds/articles database) errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur in the feeds/articles repository.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum RepoError {
    /// Underlying database failure
    #[error("Database error: {message}")]
    Database {
        /// Description of the database failure
        message: String,
    },

    /// Requested row does not exist
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing row
        what: String,
    },
}
