//! Upstream failure classification.
//!
//! The upstream platform signals failures through status codes and loosely
//! structured error payloads. Classification is deliberately substring
//! based: the match rules are data, so they can evolve with the platform
//! without touching selection or quarantine logic. All side effects are
//! driven by the caller from the returned kind.

use serde::{Deserialize, Serialize};

/// Containment outcome for one upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Credential was revoked upstream; disable the account durably
    PermanentlyInvalid,
    /// Upstream throttled the account; quarantine for the current day
    RateLimited,
    /// Upstream rejected the request shape; quarantine for the current day
    BadRequest,
    /// Unrecognized failure; quarantined conservatively for the current day
    Unknown,
}

/// Substring markers matched (case-insensitively) against upstream error
/// payloads, plus the status-code shortcuts. Match order is fixed: auth
/// markers win over bad-request markers, which win over rate-limit markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRules {
    /// Markers indicating the credential was revoked
    pub auth_markers: Vec<String>,
    /// Markers indicating a malformed request
    pub bad_request_markers: Vec<String>,
    /// Markers indicating throttling
    pub rate_limit_markers: Vec<String>,
}

impl Default for ClassifyRules {
    fn default() -> Self {
        Self {
            auth_markers: vec![
                "unauthorized".to_string(),
                "credential revoked".to_string(),
                "auth expired".to_string(),
            ],
            bad_request_markers: vec!["bad request".to_string(), "malformed".to_string()],
            rate_limit_markers: vec![
                "too many requests".to_string(),
                "rate limit".to_string(),
                "temporarily throttled".to_string(),
            ],
        }
    }
}

impl ClassifyRules {
    /// Classify an upstream failure from its status code and error payload.
    /// Pure; transport failures with no response carry status 0 and an
    /// empty body, which lands on `Unknown`.
    pub fn classify(&self, status: u16, body: &str) -> FailureKind {
        let body_lower = body.to_lowercase();

        if status == 401 || contains_any(&body_lower, &self.auth_markers) {
            FailureKind::PermanentlyInvalid
        } else if status == 400 || contains_any(&body_lower, &self.bad_request_markers) {
            FailureKind::BadRequest
        } else if status == 429 || contains_any(&body_lower, &self.rate_limit_markers) {
            FailureKind::RateLimited
        } else {
            FailureKind::Unknown
        }
    }
}

fn contains_any(body_lower: &str, markers: &[String]) -> bool {
    markers.iter().any(|marker| body_lower.contains(marker.as_str()))
}
