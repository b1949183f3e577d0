//! Blizzard API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Placeholder substituted with the region in URL templates.
pub const REGION_PLACEHOLDER: &str = "{region}";

fn default_oauth_url() -> String {
    "https://{region}.battle.net/oauth/token".into()
}

fn default_api_url() -> String {
    "https://{region}.api.blizzard.com/data/wow/token/index".into()
}

fn default_locale() -> String {
    "en_US".into()
}

const fn default_token_safety_margin_secs() -> u64 {
    300
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

/// HTTP client settings for upstream calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// Upstream price API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// OAuth token endpoint template.
    #[serde(default = "default_oauth_url")]
    pub oauth_url: String,
    /// WoW Token index endpoint template.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Locale passed to the data API.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Seconds subtracted from a token's lifetime before it is considered expired.
    #[serde(default = "default_token_safety_margin_secs")]
    pub token_safety_margin_secs: u64,
    #[serde(default)]
    pub http: HttpConfig,
}

impl UpstreamConfig {
    /// Safety margin as a [`Duration`].
    #[must_use]
    pub const fn token_safety_margin(&self) -> Duration {
        Duration::from_secs(self.token_safety_margin_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            oauth_url: default_oauth_url(),
            api_url: default_api_url(),
            locale: default_locale(),
            token_safety_margin_secs: default_token_safety_margin_secs(),
            http: HttpConfig::default(),
        }
    }
}

/// OAuth client credentials, read from the environment only.
#[derive(Clone)]
pub struct BlizzardCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl BlizzardCredentials {
    /// Read `BLIZZARD_CLIENT_ID` and `BLIZZARD_CLIENT_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] naming the first missing variable.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    #[allow(clippy::result_large_err)]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |field: &'static str| {
            lookup(field)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingField { field })
        };
        Ok(Self {
            client_id: read("BLIZZARD_CLIENT_ID")?,
            client_secret: read("BLIZZARD_CLIENT_SECRET")?,
        })
    }
}

impl std::fmt::Debug for BlizzardCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlizzardCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
