//! In-memory account store.
//!
//! Used by tests and by deployments that inject credentials at startup
//! (e.g. from environment) and don't want them on disk. Enumeration order
//! is insertion order.

use std::sync::Mutex;

use async_trait::async_trait;

use readsync_types::{Account, AccountError, AccountStatus};

use super::AccountStore;

/// Mutex-guarded vector of accounts; order is insertion order.
pub struct MemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { accounts: Mutex::new(Vec::new()) }
    }

    /// Create a store pre-populated with `accounts`, keeping their order.
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self { accounts: Mutex::new(accounts) }
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, Vec<Account>>, AccountError> {
        self.accounts
            .lock()
            .map_err(|_| AccountError::Storage { message: "store lock poisoned".to_string() })
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn list(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.locked()?.clone())
    }

    async fn get(&self, id: &str) -> Result<Account, AccountError> {
        self.locked()?
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AccountError::NotFound { id: id.to_string() })
    }

    async fn upsert(&self, account: Account) -> Result<(), AccountError> {
        let mut accounts = self.locked()?;
        match accounts.iter_mut().find(|a| a.id == account.id) {
            Some(existing) => *existing = account,
            None => accounts.push(account),
        }
        Ok(())
    }

    async fn set_status(
        &self,
        id: &str,
        status: AccountStatus,
        reason: Option<&str>,
    ) -> Result<(), AccountError> {
        let mut accounts = self.locked()?;
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AccountError::NotFound { id: id.to_string() })?;

        match status {
            AccountStatus::Disabled => account.disable(reason.unwrap_or("disabled")),
            AccountStatus::Enabled => {
                account.status = AccountStatus::Enabled;
                account.disabled_reason = None;
                account.disabled_at = None;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AccountError> {
        self.locked()?.retain(|a| a.id != id);
        Ok(())
    }
}
