//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{load_config, output, paths};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "config": serde_json::to_value(config)?,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Database", &config.database);
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);

    output::section("Scheduler");
    output::field(
        "Interval",
        format!("{} min", config.scheduler.interval_minutes),
    );

    output::section("Upstream");
    output::field("OAuth", &config.upstream.oauth_url);
    output::field("API", &config.upstream.api_url);
    output::field("Locale", &config.upstream.locale);
    output::field(
        "Token margin",
        format!("{}s", config.upstream.token_safety_margin_secs),
    );
    output::field(
        "Timeouts",
        format!(
            "{}ms request, {}ms connect",
            config.upstream.http.timeout_ms, config.upstream.http.connect_timeout_ms
        ),
    );

    output::section("Alerts");
    output::field("Regions", config.alerts.regions.join(", "));
    output::field("Default region", &config.alerts.default_region);
    output::field(
        "Threshold",
        format!(
            "{} ..= {} gold",
            config.alerts.min_threshold, config.alerts.max_threshold
        ),
    );

    output::section("Telegram");
    output::field("Enabled", config.telegram.enabled);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: Option<&Path>) -> Result<()> {
    let shown = path.map_or_else(paths::default_config, Path::to_path_buf);
    let config = load_config(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": shown.display().to_string(),
            "valid": true,
        }));
        return Ok(());
    }

    output::success("Configuration valid");
    output::field("Path", shown.display());
    output::field("Database", &config.database);
    Ok(())
}
