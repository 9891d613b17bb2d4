//! Semantic oracle configuration.

use serde::{Deserialize, Serialize};

/// Default per-attempt timeout in seconds.
const fn default_timeout_secs() -> u64 {
    15
}

/// Default retry count after the first attempt.
const fn default_max_retries() -> u32 {
    1
}

fn default_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

/// Retries are capped at one regardless of configuration.
pub const RETRY_CAP: u32 = 1;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    /// Whether Content-tier adequacy checks consult the oracle at all.
    #[serde(default)]
    pub enabled: bool,

    /// HTTP endpoint accepting `{model, prompt}` and answering `{verdict, reason}`.
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token sent with each request (optional).
    #[serde(default)]
    pub api_key: String,

    /// Model identifier forwarded to the endpoint.
    #[serde(default = "default_model")]
    pub model: String,

    /// Timeout for a single attempt, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after a failed attempt (capped at [`RETRY_CAP`]).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl OracleConfig {
    /// Returns `true` when the oracle is enabled and has an endpoint.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.endpoint.trim().is_empty()
    }

    /// Retry count after applying [`RETRY_CAP`].
    #[must_use]
    pub fn effective_retries(&self) -> u32 {
        self.max_retries.min(RETRY_CAP)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            api_key: String::new(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}
