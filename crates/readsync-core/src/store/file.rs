//! JSON-file-backed account store.
//!
//! One file per account under `<data_dir>/accounts/`, plus an index file
//! that fixes enumeration order. All writes go through a tmp-file-then-
//! rename so a crash never leaves a half-written file behind. Blocking
//! filesystem work runs on the blocking pool; a store-wide lock serializes
//! mutations so index and account files cannot drift apart.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use readsync_types::{Account, AccountError, AccountIndex, AccountStatus, AccountSummary};

use super::AccountStore;

/// Filename for the account index.
const ACCOUNTS_INDEX: &str = "accounts.json";
/// Directory name for individual account files.
const ACCOUNTS_DIR: &str = "accounts";

/// File-per-account credential store rooted in a data directory.
pub struct FileAccountStore {
    accounts_dir: PathBuf,
    index_path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileAccountStore {
    /// Open (and create if needed) the store under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self, AccountError> {
        let accounts_dir = data_dir.join(ACCOUNTS_DIR);
        fs::create_dir_all(&accounts_dir).map_err(|e| AccountError::Storage {
            message: format!("Failed to create accounts directory: {}", e),
        })?;

        Ok(Self {
            accounts_dir,
            index_path: data_dir.join(ACCOUNTS_INDEX),
            lock: Arc::new(Mutex::new(())),
        })
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T, AccountError>
    where
        T: Send + 'static,
        F: FnOnce(&Path, &Path) -> Result<T, AccountError> + Send + 'static,
    {
        let accounts_dir = self.accounts_dir.clone();
        let index_path = self.index_path.clone();
        let lock = Arc::clone(&self.lock);

        tokio::task::spawn_blocking(move || {
            let _guard = lock
                .lock()
                .map_err(|_| AccountError::Storage { message: "store lock poisoned".to_string() })?;
            f(&accounts_dir, &index_path)
        })
        .await
        .map_err(|e| AccountError::Storage { message: format!("blocking task failed: {}", e) })?
    }
}

#[async_trait]
impl AccountStore for FileAccountStore {
    async fn list(&self) -> Result<Vec<Account>, AccountError> {
        self.run_blocking(list_accounts).await
    }

    async fn get(&self, id: &str) -> Result<Account, AccountError> {
        let id = id.to_string();
        self.run_blocking(move |accounts_dir, _| load_account(accounts_dir, &id)).await
    }

    async fn upsert(&self, account: Account) -> Result<(), AccountError> {
        if account.token.is_empty() {
            return Err(AccountError::Validation {
                field: "token".to_string(),
                message: "token must not be empty".to_string(),
            });
        }

        self.run_blocking(move |accounts_dir, index_path| {
            save_account(accounts_dir, &account)?;

            let mut index = load_index(index_path)?;
            let summary = AccountSummary::from(&account);
            match index.accounts.iter_mut().find(|s| s.id == account.id) {
                Some(existing) => *existing = summary,
                None => index.accounts.push(summary),
            }
            save_index(index_path, &index)
        })
        .await
    }

    async fn set_status(
        &self,
        id: &str,
        status: AccountStatus,
        reason: Option<&str>,
    ) -> Result<(), AccountError> {
        let id = id.to_string();
        let reason = reason.map(str::to_string);

        self.run_blocking(move |accounts_dir, _| {
            let mut account = load_account(accounts_dir, &id)?;
            match status {
                AccountStatus::Disabled => {
                    account.disable(reason.unwrap_or_else(|| "disabled".to_string()));
                }
                AccountStatus::Enabled => {
                    account.status = AccountStatus::Enabled;
                    account.disabled_reason = None;
                    account.disabled_at = None;
                }
            }
            save_account(accounts_dir, &account)
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), AccountError> {
        let id = id.to_string();

        self.run_blocking(move |accounts_dir, index_path| {
            let path = account_path(accounts_dir, &id);
            if path.exists() {
                fs::remove_file(&path).map_err(|e| AccountError::Storage {
                    message: format!("Failed to remove account file: {}", e),
                })?;
            }

            let mut index = load_index(index_path)?;
            index.accounts.retain(|s| s.id != id);
            save_index(index_path, &index)
        })
        .await
    }
}

fn account_path(accounts_dir: &Path, id: &str) -> PathBuf {
    accounts_dir.join(format!("{}.json", id))
}

/// Load the account index file; a missing file is an empty index.
fn load_index(index_path: &Path) -> Result<AccountIndex, AccountError> {
    if !index_path.exists() {
        return Ok(AccountIndex::new());
    }

    let content = fs::read_to_string(index_path).map_err(|e| AccountError::Storage {
        message: format!("Failed to read account index: {}", e),
    })?;

    serde_json::from_str(&content).map_err(|e| AccountError::Storage {
        message: format!("Failed to parse account index: {}", e),
    })
}

/// Save the account index file atomically.
fn save_index(index_path: &Path, index: &AccountIndex) -> Result<(), AccountError> {
    let temp_path = index_path.with_extension("json.tmp");

    let content = serde_json::to_string_pretty(index).map_err(|e| AccountError::Storage {
        message: format!("Failed to serialize account index: {}", e),
    })?;

    fs::write(&temp_path, content).map_err(|e| AccountError::Storage {
        message: format!("Failed to write temp index file: {}", e),
    })?;

    fs::rename(&temp_path, index_path).map_err(|e| AccountError::Storage {
        message: format!("Failed to replace index file: {}", e),
    })
}

/// Load a single account by ID.
fn load_account(accounts_dir: &Path, id: &str) -> Result<Account, AccountError> {
    let path = account_path(accounts_dir, id);

    if !path.exists() {
        return Err(AccountError::NotFound { id: id.to_string() });
    }

    let content = fs::read_to_string(&path).map_err(|e| AccountError::Storage {
        message: format!("Failed to read account data: {}", e),
    })?;

    serde_json::from_str(&content).map_err(|e| AccountError::Storage {
        message: format!("Failed to parse account data: {}", e),
    })
}

/// Save a single account atomically.
fn save_account(accounts_dir: &Path, account: &Account) -> Result<(), AccountError> {
    let path = account_path(accounts_dir, &account.id);
    let temp_path = accounts_dir.join(format!("{}.json.tmp", account.id));

    let content = serde_json::to_string_pretty(account).map_err(|e| AccountError::Storage {
        message: format!("Failed to serialize account data: {}", e),
    })?;

    if let Err(e) = fs::write(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(AccountError::Storage {
            message: format!("Failed to write temp account file: {}", e),
        });
    }

    fs::rename(&temp_path, &path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        AccountError::Storage { message: format!("Failed to replace account file: {}", e) }
    })
}

/// List all accounts with auto-repair for missing/corrupted entries.
fn list_accounts(accounts_dir: &Path, index_path: &Path) -> Result<Vec<Account>, AccountError> {
    let mut index = load_index(index_path)?;
    let mut accounts = Vec::new();
    let mut invalid_ids = Vec::new();

    for summary in &index.accounts {
        match load_account(accounts_dir, &summary.id) {
            Ok(account) => accounts.push(account),
            Err(e) => {
                tracing::error!("Failed to load account {}: {}", summary.id, e);
                invalid_ids.push(summary.id.clone());
            }
        }
    }

    if !invalid_ids.is_empty() {
        tracing::warn!("Found {} invalid account index entries, cleaning up", invalid_ids.len());
        index.accounts.retain(|s| !invalid_ids.contains(&s.id));
        if let Err(e) = save_index(index_path, &index) {
            tracing::error!("Failed to save cleaned index: {}", e);
        }
    }

    Ok(accounts)
}
