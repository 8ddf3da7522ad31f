//! Typed error definitions for readsync.
//!
//! This module provides a structured error hierarchy with specific error types
//! for different domains. All errors are designed to be:
//!
//! - **Serializable** for API responses via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for error handling logic via enum variants
//! - **Composable** via thiserror derive macros

mod account;
mod config;
mod repo;
mod upstream;

pub use account::AccountError;
pub use config::ConfigError;
pub use repo::RepoError;
pub use upstream::UpstreamError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
///
/// Use this when you need a single error type that can represent
/// any readsync error.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps an account-related error
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// Wraps an upstream call error
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Wraps a repository error
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    /// Wraps a configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl TypedError {
    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Account(e) => e.http_status_code(),
            Self::Upstream(e) => e.http_status_code(),
            Self::Repo(RepoError::NotFound { .. }) => 404,
            Self::Repo(_) => 500,
            Self::Config(_) => 500,
        }
    }
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;
