//! Login handshake models.

use serde::{Deserialize, Serialize};

/// A pending login handshake with the upstream platform.
///
/// The platform hands out a session id plus a scan URL; the client keeps
/// polling until the platform grants a credential or the session expires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginSession {
    /// Handshake session identifier
    pub id: String,
    /// URL the user opens (or scans) to approve the login
    pub scan_url: String,
    /// Timestamp the session was created
    pub created_at: i64,
    /// Timestamp after which the session is no longer pollable
    pub expires_at: i64,
}

impl LoginSession {
    /// Whether the session has passed its expiry instant.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// Result of polling a login session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoginPoll {
    /// The user has not approved the login yet
    Waiting,
    /// A credential was granted and stored
    Granted {
        /// Identifier of the newly stored account
        account_id: String,
    },
    /// The session expired or is unknown
    Expired,
}
