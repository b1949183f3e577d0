//! Telegram dispatcher for triggered alerts.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{debug, error};

use crate::domain::DestinationId;
use crate::error::{Error, Result};
use crate::port::outbound::notifier::{AlertNotification, Dispatcher};

use super::format::format_alert_message;

/// Delivers alert notifications to Telegram chats.
///
/// The destination id is the numeric chat id of the target chat.
pub struct TelegramDispatcher {
    bot: Bot,
}

impl TelegramDispatcher {
    /// Create a dispatcher for the bot identified by `bot_token`.
    #[must_use]
    pub fn new(bot_token: &str) -> Self {
        Self {
            bot: Bot::new(bot_token),
        }
    }
}

/// Parse a destination id into a Telegram chat id.
pub(crate) fn parse_chat_id(destination: &DestinationId) -> Result<ChatId> {
    destination
        .as_str()
        .trim()
        .parse::<i64>()
        .map(ChatId)
        .map_err(|_| Error::Delivery(format!("invalid Telegram chat id: {destination}")))
}

#[async_trait]
impl Dispatcher for TelegramDispatcher {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn deliver(
        &self,
        destination: &DestinationId,
        notification: &AlertNotification,
    ) -> Result<()> {
        let chat_id = parse_chat_id(destination)?;
        let text = format_alert_message(notification);

        self.bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(|e| {
                error!(error = %e, chat_id = chat_id.0, "Failed to send Telegram message");
                Error::Delivery(e.to_string())
            })?;

        debug!(alert_id = %notification.alert_id, chat_id = chat_id.0, "Telegram alert sent");
        Ok(())
    }
}
