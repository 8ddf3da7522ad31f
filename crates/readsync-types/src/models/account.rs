//! Account model and related types.

use serde::{Deserialize, Serialize};

/// Durable account status. The only transition the containment core ever
/// requests is Enabled -> Disabled; Disabled is terminal from its point of
/// view (an operator may re-enable out of band).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account participates in selection
    Enabled,
    /// Account is permanently out of rotation
    Disabled,
}

/// Account data structure representing one platform credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Unique identifier for the account
    pub id: String,
    /// Optional display name
    pub name: Option<String>,
    /// Bearer token used to authenticate against the upstream platform
    pub token: String,
    /// Durable enabled/disabled status
    pub status: AccountStatus,
    /// Reason the account was disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<String>,
    /// Timestamp when the account was disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_at: Option<i64>,
    /// Timestamp when account was created
    pub created_at: i64,
    /// Timestamp when account was last used
    pub last_used: i64,
}

impl Account {
    /// Create a new enabled account with the given ID and token.
    pub fn new(id: String, token: String) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id,
            name: None,
            token,
            status: AccountStatus::Enabled,
            disabled_reason: None,
            disabled_at: None,
            created_at: now,
            last_used: now,
        }
    }

    /// Check if the account participates in selection.
    pub const fn is_enabled(&self) -> bool {
        matches!(self.status, AccountStatus::Enabled)
    }

    /// Take the account out of rotation permanently.
    pub fn disable(&mut self, reason: impl Into<String>) {
        self.status = AccountStatus::Disabled;
        self.disabled_reason = Some(reason.into());
        self.disabled_at = Some(chrono::Utc::now().timestamp());
    }

    /// Update the last used timestamp to now.
    pub fn update_last_used(&mut self) {
        self.last_used = chrono::Utc::now().timestamp();
    }
}

/// Account index data structure (accounts.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountIndex {
    /// Schema version
    pub version: String,
    /// List of account summaries, in enumeration order
    pub accounts: Vec<AccountSummary>,
}

impl AccountIndex {
    /// Create a new empty account index.
    pub fn new() -> Self {
        Self { version: "1.0".to_string(), accounts: Vec::new() }
    }
}

impl Default for AccountIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Account summary for the index file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Unique identifier
    pub id: String,
    /// Optional display name
    pub name: Option<String>,
    /// Creation timestamp
    pub created_at: i64,
    /// Last used timestamp
    pub last_used: i64,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            created_at: account.created_at,
            last_used: account.last_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_is_enabled() {
        let account = Account::new("acc-1".to_string(), "tok".to_string());
        assert!(account.is_enabled());
        assert!(account.disabled_reason.is_none());
    }

    #[test]
    fn test_disable_records_reason_and_timestamp() {
        let mut account = Account::new("acc-1".to_string(), "tok".to_string());
        account.disable("auth revoked by upstream");

        assert!(!account.is_enabled());
        assert_eq!(account.disabled_reason.as_deref(), Some("auth revoked by upstream"));
        assert!(account.disabled_at.is_some());
    }

    #[test]
    fn test_status_roundtrip() {
        let json = serde_json::to_string(&AccountStatus::Disabled).expect("serialize");
        assert_eq!(json, "\"disabled\"");
        let back: AccountStatus = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, AccountStatus::Disabled);
    }
}
