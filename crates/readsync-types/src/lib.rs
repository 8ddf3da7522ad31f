//! # Readsync Types
//!
//! Core types, models, and error definitions for readsync.
//!
//! This crate provides the foundational type system for the readsync
//! workspace:
//!
//! - **`error`** - Typed error hierarchy for accounts, upstream calls,
//!   storage, and configuration
//! - **`models`** - Domain models (Account, Feed, Article, LoginSession,
//!   AppConfig)
//!
//! ## Architecture Role
//!
//! `readsync-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!     readsync-types (this crate)
//!             │
//!             ▼
//!      readsync-core
//!             │
//!             ▼
//!     readsync-server
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for API responses and on-disk storage
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{AccountError, ConfigError, RepoError, Result, TypedError, UpstreamError};

// Re-export core model types
pub use models::{
    Account, AccountIndex, AccountStatus, AccountSummary, AppConfig, Article, Feed, LoginPoll,
    LoginSession, ServerConfig, UpstreamConfig,
};
