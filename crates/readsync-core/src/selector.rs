//! Account selection.
//!
//! Selection policy is deliberately minimal: the first enabled account that
//! is not quarantined for the current day wins. Ties break by the store's
//! enumeration order, which is stable for a fixed store state. No fairness
//! or load-balancing is attempted.

use std::sync::Arc;

use readsync_types::{Account, AccountError};

use crate::calendar::Calendar;
use crate::quarantine::QuarantineLedger;
use crate::store::AccountStore;

/// Picks one eligible account per outbound call.
pub struct AccountSelector {
    store: Arc<dyn AccountStore>,
    ledger: Arc<QuarantineLedger>,
    calendar: Calendar,
}

impl AccountSelector {
    /// Wire a selector against its collaborators.
    pub fn new(
        store: Arc<dyn AccountStore>,
        ledger: Arc<QuarantineLedger>,
        calendar: Calendar,
    ) -> Self {
        Self { store, ledger, calendar }
    }

    /// Return the first enabled account not quarantined for today, or
    /// `PoolExhausted` when no such account exists.
    pub async fn pick(&self) -> Result<Account, AccountError> {
        let today = self.calendar.today();
        let enabled = self.store.list_enabled().await?;
        let total = enabled.len();

        match enabled.into_iter().find(|a| !self.ledger.is_quarantined(&today, &a.id)) {
            Some(account) => {
                tracing::debug!("selected account {} for {}", account.id, today);
                Ok(account)
            }
            None => {
                let reason = if total == 0 {
                    "no enabled accounts".to_string()
                } else {
                    format!("all {} enabled accounts are quarantined for {}", total, today)
                };
                tracing::warn!("account pool exhausted: {}", reason);
                Err(AccountError::PoolExhausted { reason })
            }
        }
    }
}
