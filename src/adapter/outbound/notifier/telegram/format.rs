//! Message formatting for Telegram notifications.

use crate::domain::{group_thousands, Direction};
use crate::port::outbound::notifier::AlertNotification;

/// Render a triggered alert as a MarkdownV2 message.
pub fn format_alert_message(notification: &AlertNotification) -> String {
    let (emoji, text) = match notification.direction {
        Direction::Above => ("📈", "gone above"),
        Direction::Below => ("📉", "dropped below"),
    };
    let region = notification.region.as_str().to_uppercase();
    let updated = notification
        .last_updated
        .format("%Y-%m-%d %H:%M UTC")
        .to_string();

    format!(
        "🚨 *WoW Token Price Alert\\!* {emoji}\n\
        \n\
        {} The WoW Token price in *{}* has {text} your threshold\\!\n\
        \n\
        💰 Current Price: `{} gold`\n\
        🎯 Your Threshold: `{} gold`\n\
        🕒 Last Updated: {}\n\
        🔖 Alert: `{}`",
        mention(notification.subscriber_id.as_str()),
        escape_markdown(&region),
        group_thousands(notification.price),
        group_thousands(notification.threshold),
        escape_markdown(&updated),
        escape_code(notification.alert_id.as_str()),
    )
}

/// Mention a subscriber. Numeric ids become user links.
fn mention(subscriber: &str) -> String {
    match subscriber.parse::<i64>() {
        Ok(user_id) => format!("[{}](tg://user?id={user_id})", escape_markdown(subscriber)),
        Err(_) => escape_markdown(subscriber),
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
        '\\',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Escape text placed inside an inline code span.
fn escape_code(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`")
}
