use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ClientConfig::base_url`].
pub const API_BASE_ENV: &str = "POLICYDESK_API_BASE";

/// Environment variable overriding [`ClientConfig::timeout_secs`].
pub const TIMEOUT_ENV: &str = "POLICYDESK_TIMEOUT_SECS";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every collection endpoint hangs off
    /// (e.g. `http://localhost:8080/api`).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Defaults overridden by `POLICYDESK_API_BASE` / `POLICYDESK_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    /// Blank values and unparseable timeouts fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV).and_then(|v| v.trim().parse().ok()) {
            config.timeout_secs = timeout;
        }
        config
    }

    /// URL of a whole collection.
    pub fn collection_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// URL of one record in a collection.
    pub fn item_url(&self, endpoint: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(endpoint), urlencoding::encode(id))
    }
}
