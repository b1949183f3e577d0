//! Dispatcher adapters.
//!
//! Implements the `port::outbound::notifier::Dispatcher` trait for
//! notification backends other than plain logging.

#[cfg(feature = "telegram")]
pub mod telegram;
