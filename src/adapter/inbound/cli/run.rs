//! Handler for the `run` command.

use tokio::signal;
use tracing::info;

use crate::adapter::inbound::cli::{init_logging, output};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Start the scheduler and keep it running until Ctrl-C.
pub async fn execute(config: Config) -> Result<()> {
    init_logging(&config, true);
    info!(
        database = %config.database,
        interval_minutes = config.scheduler.interval_minutes,
        "tokenwatch starting"
    );

    let scheduler = bootstrap::build_scheduler(&config)?;
    print_startup(&config);

    let handle = scheduler.start();
    let waited = signal::ctrl_c().await;
    info!("Shutdown signal received (Ctrl+C)");
    handle.shutdown().await;
    waited?;

    output::success("Scheduler stopped");
    info!("tokenwatch stopped");
    Ok(())
}

fn print_startup(config: &Config) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Database", &config.database);
    output::field(
        "Interval",
        format!("{} min", config.scheduler.interval_minutes),
    );
    output::field("Regions", config.alerts.regions.join(", "));
    if output::verbosity() > 0 {
        output::field("Token margin", format!("{}s", config.upstream.token_safety_margin_secs));
        output::field("Locale", &config.upstream.locale);
    }
    if config.telegram.enabled {
        output::field("Telegram", output::highlight("enabled"));
    } else {
        output::note("Telegram disabled, triggered alerts are logged only");
    }
}
