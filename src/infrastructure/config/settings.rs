//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file. Secrets never live in the file:
//! Blizzard credentials and the Telegram bot token come from the environment,
//! and `POLL_INTERVAL_MINUTES` overrides the scheduler interval.
//!
//! # Example
//!
//! ```no_run
//! use tokenwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::alerts::AlertsConfig;
use super::logging::LoggingConfig;
use super::scheduler::{SchedulerConfig, MAX_INTERVAL_MINUTES};
use super::telegram::TelegramAppConfig;
use super::upstream::{UpstreamConfig, REGION_PLACEHOLDER};
use crate::domain::Region;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `scheduler.interval_minutes`.
pub const POLL_INTERVAL_VAR: &str = "POLL_INTERVAL_MINUTES";

const SECONDS_PER_DAY: u64 = 86_400;

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "tokenwatch.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Blizzard endpoints, locale and HTTP timeouts.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Region list and threshold range for new alerts.
    #[serde(default)]
    pub alerts: AlertsConfig,

    /// Telegram notification configuration.
    #[serde(default)]
    pub telegram: TelegramAppConfig,
}

fn default_database_path() -> String {
    "tokenwatch.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            scheduler: SchedulerConfig::default(),
            upstream: UpstreamConfig::default(),
            alerts: AlertsConfig::default(),
            telegram: TelegramAppConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content, apply environment overrides
    /// and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - `POLL_INTERVAL_MINUTES` is set but not a number
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, |key| std::env::var(key).ok())
    }

    /// Same as [`Self::parse_toml`], reading overrides through `lookup`.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with(content: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Defaults with environment overrides applied, for runs without a file.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is malformed.
    #[allow(clippy::result_large_err)]
    pub fn from_env_defaults() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = lookup(POLL_INTERVAL_VAR) {
            self.scheduler.interval_minutes =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: POLL_INTERVAL_VAR,
                        reason: format!("expected whole minutes, got {raw:?}"),
                    })?;
        }
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`ConfigError`].
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.scheduler.interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_minutes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.scheduler.interval_minutes > MAX_INTERVAL_MINUTES {
            return Err(ConfigError::InvalidValue {
                field: "interval_minutes",
                reason: format!("must be at most {MAX_INTERVAL_MINUTES} (one day)"),
            }
            .into());
        }
        for (field, template) in [
            ("oauth_url", &self.upstream.oauth_url),
            ("api_url", &self.upstream.api_url),
        ] {
            if !template.contains(REGION_PLACEHOLDER) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must contain the {REGION_PLACEHOLDER} placeholder"),
                }
                .into());
            }
        }
        if self.upstream.locale.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "locale" }.into());
        }
        if self.upstream.token_safety_margin_secs >= SECONDS_PER_DAY {
            return Err(ConfigError::InvalidValue {
                field: "token_safety_margin_secs",
                reason: "must be less than one day".to_string(),
            }
            .into());
        }
        if self.upstream.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.upstream.http.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.alerts.regions.is_empty() {
            return Err(ConfigError::MissingField { field: "regions" }.into());
        }
        if self.alerts.min_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_threshold",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.alerts.min_threshold > self.alerts.max_threshold {
            return Err(ConfigError::InvalidValue {
                field: "max_threshold",
                reason: "must be at least min_threshold".to_string(),
            }
            .into());
        }
        let default_region = self.alerts.default_region();
        if !self.alerts.allows(&default_region) {
            return Err(ConfigError::InvalidValue {
                field: "default_region",
                reason: format!("{default_region} is not in regions"),
            }
            .into());
        }
        Ok(())
    }

    /// Regions alerts may be created for.
    #[must_use]
    pub fn regions(&self) -> Vec<Region> {
        self.alerts.regions()
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
