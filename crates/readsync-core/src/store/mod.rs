//! Credential store.
//!
//! The containment core never creates or deletes accounts on its own; it
//! reads them and requests status transitions. The store is an injected
//! component so gateway and selector can be wired against anything that
//! implements [`AccountStore`].

mod file;
mod memory;

pub use file::FileAccountStore;
pub use memory::MemoryAccountStore;

use async_trait::async_trait;

use readsync_types::{Account, AccountError, AccountStatus};

/// Persistent credential store.
///
/// `list` enumerates accounts in the store's natural order; selection
/// depends on that order being stable for a fixed store state.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// All accounts, in enumeration order.
    async fn list(&self) -> Result<Vec<Account>, AccountError>;

    /// Accounts with status Enabled, preserving enumeration order.
    async fn list_enabled(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.list().await?.into_iter().filter(Account::is_enabled).collect())
    }

    /// One account by id.
    async fn get(&self, id: &str) -> Result<Account, AccountError>;

    /// Insert or replace an account.
    async fn upsert(&self, account: Account) -> Result<(), AccountError>;

    /// Durable status transition. Redundant writes of the same status are
    /// fine; the only transition the core requests is one-way.
    async fn set_status(
        &self,
        id: &str,
        status: AccountStatus,
        reason: Option<&str>,
    ) -> Result<(), AccountError>;

    /// Remove an account entirely (operator action, never the core).
    async fn delete(&self, id: &str) -> Result<(), AccountError>;
}
