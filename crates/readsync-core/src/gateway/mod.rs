//! Request gateway.
//!
//! Every outbound call to the upstream platform goes through here. The
//! gateway attaches the chosen account's identity, and on failure runs the
//! containment pipeline: classify the upstream signal, then either disable
//! the account durably (credential revoked) or quarantine it for the rest
//! of the current day. The original failure is always re-raised afterwards;
//! containment never substitutes for surfacing the error, and the gateway
//! performs no retries.

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use readsync_types::{Account, AccountStatus, ConfigError, UpstreamConfig, UpstreamError};

use crate::calendar::Calendar;
use crate::classifier::{ClassifyRules, FailureKind};
use crate::quarantine::QuarantineLedger;
use crate::store::AccountStore;

/// Header carrying the account identifier on authenticated calls.
const ACCOUNT_ID_HEADER: &str = "x-account-id";

/// Authenticated HTTP client for the upstream platform, with failure
/// containment wired in.
pub struct UpstreamGateway {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn AccountStore>,
    ledger: Arc<QuarantineLedger>,
    calendar: Calendar,
    rules: ClassifyRules,
}

impl UpstreamGateway {
    /// Build a gateway from config and its collaborators. Validates the
    /// base URL and constructs the HTTP client with the fixed per-request
    /// timeout.
    pub fn new(
        config: &UpstreamConfig,
        store: Arc<dyn AccountStore>,
        ledger: Arc<QuarantineLedger>,
        calendar: Calendar,
        rules: ClassifyRules,
    ) -> Result<Self, ConfigError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            field: "upstream.base_url".to_string(),
            message: e.to_string(),
        })?;

        if config.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "upstream.request_timeout_secs".to_string(),
                message: "timeout must be positive".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConfigError::Invalid {
                field: "upstream".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, base_url, store, ledger, calendar, rules })
    }

    /// Issue an authenticated call as `account`.
    ///
    /// Success responses are decoded and returned unchanged, with no side
    /// effects. Failures run the containment pipeline before the original
    /// error is returned.
    pub async fn send<R: DeserializeOwned>(
        &self,
        account: &Account,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<R, UpstreamError> {
        let response = match self.dispatch(method, path, body, Some(account)).await {
            Ok(response) => response,
            Err(err) => {
                // Transport failure (timeout, connect error): there is no
                // upstream payload to classify, so this lands on Unknown.
                self.contain(&account.id, 0, "").await;
                return Err(err);
            }
        };

        let status = response.status();
        if status.is_success() {
            return response
                .json::<R>()
                .await
                .map_err(|e| UpstreamError::Decode { message: e.to_string() });
        }

        let body_text = response.text().await.unwrap_or_default();
        self.contain(&account.id, status.as_u16(), &body_text).await;

        Err(UpstreamError::Api {
            account_id: Some(account.id.clone()),
            status: status.as_u16(),
            body: body_text,
        })
    }

    /// Issue a call without credential attachment (the login handshake runs
    /// before any account exists). No containment on failure.
    pub async fn send_public<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<R, UpstreamError> {
        let response = self.dispatch(method, path, body, None).await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<R>()
                .await
                .map_err(|e| UpstreamError::Decode { message: e.to_string() });
        }

        let body_text = response.text().await.unwrap_or_default();
        Err(UpstreamError::Api { account_id: None, status: status.as_u16(), body: body_text })
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        account: Option<&Account>,
    ) -> Result<reqwest::Response, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);

        if let Some(account) = account {
            request = request
                .header(ACCOUNT_ID_HEADER, account.id.as_str())
                .bearer_auth(&account.token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        request.send().await.map_err(|e| UpstreamError::Network {
            account_id: account.map(|a| a.id.clone()),
            message: e.to_string(),
        })
    }

    /// Containment side effects for one failing request. Best-effort: a
    /// failing store write is logged and must not mask the original
    /// upstream failure, which the caller re-raises either way.
    async fn contain(&self, account_id: &str, status: u16, body: &str) {
        match self.rules.classify(status, body) {
            FailureKind::PermanentlyInvalid => {
                tracing::warn!(
                    "account {} permanently invalid (status {}), disabling",
                    account_id,
                    status
                );
                if let Err(e) = self
                    .store
                    .set_status(account_id, AccountStatus::Disabled, Some("auth revoked by upstream"))
                    .await
                {
                    tracing::warn!("failed to disable account {}: {}", account_id, e);
                }
            }
            kind => {
                let today = self.calendar.today();
                tracing::warn!(
                    "account {} failed (status {}, {:?}), quarantining for {}",
                    account_id,
                    status,
                    kind,
                    today
                );
                self.ledger.quarantine(&today, account_id);
            }
        }
    }
}
