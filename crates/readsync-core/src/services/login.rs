//! Login handshake.
//!
//! The platform mints credentials through a scan-and-approve flow: start a
//! session, show the user the scan URL, poll until the platform grants a
//! token. A granted credential is stored Enabled and immediately joins the
//! selection pool. Sessions are process-local and expire after a few
//! minutes.

use std::sync::Arc;

use dashmap::DashMap;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use readsync_types::{Account, LoginPoll, LoginSession, Result, UpstreamError};

use crate::gateway::UpstreamGateway;
use crate::store::AccountStore;

/// How long a handshake session stays pollable.
const SESSION_TTL_SECS: i64 = 300;

#[derive(Debug, Deserialize)]
struct StartLoginResponse {
    id: String,
    scan_url: String,
}

#[derive(Debug, Deserialize)]
struct PollLoginResponse {
    granted: bool,
    #[serde(default)]
    account_id: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Runs the scan-url login handshake against the upstream platform.
pub struct LoginService {
    gateway: Arc<UpstreamGateway>,
    store: Arc<dyn AccountStore>,
    sessions: DashMap<String, LoginSession>,
}

impl LoginService {
    /// Wire the service against its collaborators.
    pub fn new(gateway: Arc<UpstreamGateway>, store: Arc<dyn AccountStore>) -> Self {
        Self { gateway, store, sessions: DashMap::new() }
    }

    /// Start a handshake session. Runs unauthenticated: this is how the
    /// very first credential gets minted.
    pub async fn start(&self) -> Result<LoginSession> {
        let response: StartLoginResponse =
            self.gateway.send_public(Method::POST, "/api/login", Some(json!({}))).await?;

        let now = chrono::Utc::now().timestamp();
        let session = LoginSession {
            id: response.id,
            scan_url: response.scan_url,
            created_at: now,
            expires_at: now + SESSION_TTL_SECS,
        };
        self.sessions.insert(session.id.clone(), session.clone());

        tracing::info!("login session {} started", session.id);
        Ok(session)
    }

    /// Poll a handshake session. On grant the new account is stored Enabled
    /// and the session is retired; unknown or stale sessions report
    /// Expired.
    pub async fn poll(&self, session_id: &str) -> Result<LoginPoll> {
        let Some(session) = self.sessions.get(session_id).map(|s| s.clone()) else {
            return Ok(LoginPoll::Expired);
        };

        if session.is_expired(chrono::Utc::now().timestamp()) {
            self.sessions.remove(session_id);
            tracing::info!("login session {} expired", session_id);
            return Ok(LoginPoll::Expired);
        }

        let response: PollLoginResponse = self
            .gateway
            .send_public(Method::GET, &format!("/api/login/{}", session_id), None)
            .await?;

        if !response.granted {
            return Ok(LoginPoll::Waiting);
        }

        let (account_id, token) = match (response.account_id, response.token) {
            (Some(id), Some(token)) => (id, token),
            _ => {
                return Err(UpstreamError::Decode {
                    message: "grant response missing account_id or token".to_string(),
                }
                .into());
            }
        };

        let mut account = Account::new(account_id.clone(), token);
        account.name = response.name;
        self.store.upsert(account).await?;
        self.sessions.remove(session_id);

        tracing::info!("login session {} granted account {}", session_id, account_id);
        Ok(LoginPoll::Granted { account_id })
    }
}
