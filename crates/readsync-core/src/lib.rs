//! # Readsync Core
//!
//! Account pool management, failure containment, and sync services.
//!
//! The containment core is the interesting part of this crate: every
//! outbound call to the upstream platform goes through [`gateway::UpstreamGateway`],
//! which attaches a credential picked by [`selector::AccountSelector`] and,
//! on failure, classifies the upstream signal ([`classifier::ClassifyRules`])
//! and takes the account out of rotation: permanently through the
//! [`store::AccountStore`], or for the rest of the current calendar day
//! through the [`quarantine::QuarantineLedger`] keyed by
//! [`calendar::Calendar`] day keys.
//!
//! Everything else (feed/article services, the SQLite repository, config
//! handling) is thin plumbing layered on top.

pub mod calendar;
pub mod classifier;
pub mod config;
pub mod gateway;
pub mod quarantine;
pub mod repository;
pub mod selector;
pub mod services;
pub mod store;

pub use calendar::{Calendar, DayKey};
pub use classifier::{ClassifyRules, FailureKind};
pub use gateway::UpstreamGateway;
pub use quarantine::QuarantineLedger;
pub use repository::Repository;
pub use selector::AccountSelector;
pub use store::{AccountStore, FileAccountStore, MemoryAccountStore};
