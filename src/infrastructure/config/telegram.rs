//! Telegram notification configuration.

use serde::{Deserialize, Serialize};

/// Environment variable holding the bot token.
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Telegram notification configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramAppConfig {
    /// Deliver alerts through Telegram instead of the log.
    #[serde(default)]
    pub enabled: bool,
}

impl TelegramAppConfig {
    /// Bot token from the environment, if set and non-empty.
    #[must_use]
    pub fn bot_token() -> Option<String> {
        std::env::var(BOT_TOKEN_VAR)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}
