//! Tokenwatch - WoW Token price alerts.
//!
//! Subscribers register a gold threshold and a direction for a region. A
//! scheduler polls the Blizzard Game Data API once per region, fires every
//! alert whose condition is met, delivers one notification and retires the
//! alert.
//!
//! # Architecture
//!
//! - [`domain`] - Alerts, identifiers, price quotes. No I/O.
//! - [`port`] - Traits for storage, the upstream API and notification delivery
//! - [`adapter`] - SQLite and in-memory stores, Blizzard HTTP client,
//!   Telegram dispatcher, CLI
//! - [`application`] - Alert registry, token cache, price fetcher, scheduler
//! - [`infrastructure`] - Configuration and runtime wiring
//!
//! # Features
//!
//! - `telegram` (default) - Deliver alerts through a Telegram bot
//! - `testkit` - Scripted upstream fakes and a recording dispatcher
//!
//! # Example
//!
//! ```no_run
//! use tokenwatch::infrastructure::bootstrap;
//! use tokenwatch::infrastructure::config::settings::Config;
//!
//! # async fn run() -> tokenwatch::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let scheduler = bootstrap::build_scheduler(&config)?;
//! let handle = scheduler.start();
//! tokio::signal::ctrl_c().await?;
//! handle.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
