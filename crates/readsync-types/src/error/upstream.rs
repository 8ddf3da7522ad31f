//! Upstream call errors.
//!
//! Every failure surfaced by the request gateway is one of these variants.
//! `Api` and `Network` carry the identifier of the account that issued the
//! failing request so the containment pipeline can act on it; the error is
//! always re-raised to the caller after containment completes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when calling the upstream platform.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum UpstreamError {
    /// Upstream returned a non-success status
    #[error("Upstream returned {status} for account {}: {body}", account_id.as_deref().unwrap_or("<none>"))]
    Api {
        /// Account that issued the failing request (None for public calls)
        account_id: Option<String>,
        /// HTTP status code returned by the upstream
        status: u16,
        /// Raw upstream error payload
        body: String,
    },

    /// Transport-level failure (connect error, timeout, TLS, ...)
    #[error("Upstream request failed for account {}: {message}", account_id.as_deref().unwrap_or("<none>"))]
    Network {
        /// Account that issued the failing request (None for public calls)
        account_id: Option<String>,
        /// Transport error description
        message: String,
    },

    /// Upstream replied with a success status but an undecodable body
    #[error("Failed to decode upstream response: {message}")]
    Decode {
        /// Deserialization error description
        message: String,
    },
}

impl UpstreamError {
    /// Identifier of the account responsible for the failing request, if any.
    pub fn account_id(&self) -> Option<&str> {
        match self {
            Self::Api { account_id, .. } | Self::Network { account_id, .. } => {
                account_id.as_deref()
            }
            Self::Decode { .. } => None,
        }
    }

    /// Get HTTP status code for this error when surfaced over REST.
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Api { .. } => 502,
            Self::Network { .. } => 504,
            Self::Decode { .. } => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_accessor() {
        let api = UpstreamError::Api {
            account_id: Some("acc-1".to_string()),
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(api.account_id(), Some("acc-1"));

        let decode = UpstreamError::Decode { message: "eof".to_string() };
        assert_eq!(decode.account_id(), None);
    }

    #[test]
    fn test_display_without_account() {
        let err = UpstreamError::Network { account_id: None, message: "timeout".to_string() };
        let msg = format!("{}", err);
        assert!(msg.contains("<none>"));
        assert!(msg.contains("timeout"));
    }
}
