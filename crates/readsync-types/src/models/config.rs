//! Application configuration model.
//!
//! Every field has a serde default so old config files keep loading as new
//! fields are introduced.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8064
}

fn default_base_url() -> String {
    "http://127.0.0.1:4000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_timezone() -> String {
    "Asia/Shanghai".to_string()
}

/// Top-level application configuration, stored as JSON in the data dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Local HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream platform settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Fixed tz database identifier the daily quarantine window is scoped
    /// to. The day boundary must not depend on the host locale.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl AppConfig {
    /// Create a config with all defaults.
    pub fn new() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            timezone: default_timezone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Local HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// Upstream platform settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Base URL of the upstream platform API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Fixed per-request timeout applied to every outbound call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), request_timeout_secs: default_request_timeout_secs() }
    }
}
