//! Blizzard API response types.

use serde::Deserialize;

/// OAuth client-credentials response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

/// WoW Token index response.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TokenPriceResponse {
    /// Epoch milliseconds.
    pub last_updated_timestamp: i64,
    /// Price in copper.
    pub price: u64,
}
