//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::blizzard::BlizzardClient;
use crate::adapter::outbound::sqlite::database::connection::open;
use crate::adapter::outbound::sqlite::store::SqliteAlertStore;
use crate::application::alert::AlertService;
use crate::application::price::{PriceFetcher, TokenCache};
use crate::application::scheduler::AlertScheduler;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::upstream::BlizzardCredentials;
use crate::port::outbound::notifier::{Dispatcher, LogDispatcher};
use crate::port::outbound::store::AlertStore;

#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::TelegramDispatcher;
#[cfg(feature = "telegram")]
use crate::infrastructure::config::telegram::TelegramAppConfig;

/// Open the SQLite database named in the configuration and the alert store on it.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, migrated or scanned.
pub fn open_store(config: &Config) -> Result<Arc<SqliteAlertStore>> {
    let pool = open(&config.database)?;
    let store = SqliteAlertStore::open(pool)?;
    info!(database = %config.database, last_sequence = store.last_sequence(), "Database initialized");
    Ok(Arc::new(store))
}

/// Build the price fetcher from configuration and environment credentials.
///
/// # Errors
///
/// Returns an error if `BLIZZARD_CLIENT_ID` or `BLIZZARD_CLIENT_SECRET` is missing.
pub fn build_fetcher(config: &Config) -> Result<Arc<PriceFetcher>> {
    let credentials = BlizzardCredentials::from_env()?;
    let client = Arc::new(BlizzardClient::from_config(&config.upstream, credentials));
    let tokens = Arc::new(TokenCache::new(
        client.clone(),
        config.upstream.token_safety_margin(),
    ));
    Ok(Arc::new(PriceFetcher::new(tokens, client)))
}

/// Build the dispatcher from configuration.
///
/// Telegram is used when enabled and `TELEGRAM_BOT_TOKEN` is set; otherwise
/// alerts are only logged.
#[cfg(feature = "telegram")]
pub fn build_dispatcher(config: &Config) -> Arc<dyn Dispatcher> {
    if config.telegram.enabled {
        if let Some(token) = TelegramAppConfig::bot_token() {
            info!("Telegram dispatcher enabled");
            return Arc::new(TelegramDispatcher::new(&token));
        }
        warn!("Telegram enabled but TELEGRAM_BOT_TOKEN not set, alerts will only be logged");
    }
    Arc::new(LogDispatcher)
}

/// Build the dispatcher from configuration (non-telegram variant).
#[cfg(not(feature = "telegram"))]
pub fn build_dispatcher(config: &Config) -> Arc<dyn Dispatcher> {
    if config.telegram.enabled {
        warn!("Telegram enabled but built without the telegram feature, alerts will only be logged");
    }
    Arc::new(LogDispatcher)
}

/// Build the alert service on `store`.
pub fn build_alert_service(config: &Config, store: Arc<dyn AlertStore>) -> AlertService {
    AlertService::new(store, config.alerts.clone())
}

/// Wire the full scheduler: SQLite store, Blizzard client, dispatcher.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or credentials are missing.
pub fn build_scheduler(config: &Config) -> Result<AlertScheduler> {
    let store = open_store(config)?;
    let fetcher = build_fetcher(config)?;
    let dispatcher = build_dispatcher(config);
    info!(dispatcher = dispatcher.name(), "Dispatcher initialized");

    Ok(AlertScheduler::new(
        store,
        fetcher,
        dispatcher,
        config.scheduler.interval(),
    ))
}
