//! Handler for the `price` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::PriceArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::error::DomainError;
use crate::domain::{group_thousands, Region};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Fetch and print the current price for one region.
pub async fn execute(config: &Config, args: &PriceArgs) -> Result<()> {
    let region = args
        .region
        .as_deref()
        .map(Region::new)
        .unwrap_or_else(|| config.alerts.default_region());
    if !config.alerts.allows(&region) {
        return Err(DomainError::UnknownRegion {
            region: region.to_string(),
        }
        .into());
    }

    let fetcher = bootstrap::build_fetcher(config)?;
    let quote = fetcher.price(&region).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "price",
            "quote": quote,
        }));
        return Ok(());
    }

    output::section(&format!(
        "WoW Token Price - {}",
        region.as_str().to_uppercase()
    ));
    output::field(
        "Current price",
        output::highlight(format!("{} gold", group_thousands(quote.price))),
    );
    output::field(
        "Last updated",
        output::muted(quote.last_updated.format("%Y-%m-%d %H:%M:%S UTC")),
    );
    Ok(())
}
