//! Telegram alert delivery.
//!
//! Formats triggered alerts as MarkdownV2 messages and sends them to the
//! chat named by the alert's destination.

mod format;

pub mod dispatcher;

pub use dispatcher::TelegramDispatcher;
