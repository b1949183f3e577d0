//! Handlers for the `alert` command group.

use std::str::FromStr;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{AlertRemoveArgs, AlertSetArgs};
use crate::adapter::inbound::cli::output;
use crate::application::alert::{AlertRequest, AlertService};
use crate::domain::{
    group_thousands, Alert, AlertId, DestinationId, Direction, Region, SubscriberId,
};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Direction")]
    direction: &'static str,
    #[tabled(rename = "Threshold")]
    threshold: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id.to_string(),
            region: alert.region.as_str().to_uppercase(),
            direction: direction_label(alert.direction),
            threshold: format!("{} gold", group_thousands(alert.threshold)),
            created: alert.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Above => "📈 Above",
        Direction::Below => "📉 Below",
    }
}

fn service(config: &Config) -> Result<AlertService> {
    let store = bootstrap::open_store(config)?;
    Ok(bootstrap::build_alert_service(config, store))
}

/// Execute `alert set`.
pub async fn execute_set(config: &Config, args: &AlertSetArgs) -> Result<()> {
    let direction = Direction::from_str(&args.direction)?;
    let request = AlertRequest {
        subscriber: SubscriberId::new(args.subscriber.trim()),
        destination: DestinationId::new(args.destination.trim()),
        threshold: args.price,
        direction,
        region: args.region.as_deref().map(Region::new),
    };

    let alert = service(config)?.set(request).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "alert.set",
            "alert": alert,
        }));
        return Ok(());
    }

    let verb = match alert.direction {
        Direction::Above => "goes above",
        Direction::Below => "drops below",
    };
    output::success("Price alert created");
    output::field("ID", output::highlight(&alert.id));
    output::note(&format!(
        "Notifies {} when the price in {} {} {} gold",
        alert.destination_id,
        alert.region.as_str().to_uppercase(),
        verb,
        group_thousands(alert.threshold)
    ));
    Ok(())
}

/// Execute `alert list`.
pub async fn execute_list(config: &Config, subscriber: &str) -> Result<()> {
    let subscriber = SubscriberId::new(subscriber.trim());
    let alerts = service(config)?.list(&subscriber).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "alert.list",
            "subscriber": subscriber,
            "alerts": alerts,
        }));
        return Ok(());
    }

    if alerts.is_empty() {
        output::note("No active price alerts");
        output::note("Create one with: tokenwatch alert set --subscriber <ID> --destination <CHAT> --price <GOLD>");
        return Ok(());
    }

    output::section(&format!("Active price alerts for {subscriber}"));
    let rows: Vec<AlertRow> = alerts.iter().map(AlertRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

/// Execute `alert remove`.
pub async fn execute_remove(config: &Config, args: &AlertRemoveArgs) -> Result<()> {
    let subscriber = SubscriberId::new(args.subscriber.trim());
    let id = AlertId::new(args.id.trim());
    let removed = service(config)?.remove(&subscriber, &id).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "alert.remove",
            "id": id,
            "removed": removed,
        }));
        return Ok(());
    }

    if removed {
        output::success(&format!("Alert {id} removed"));
    } else {
        output::warning(&format!("Alert {id} not found or not owned by {subscriber}"));
    }
    Ok(())
}

/// Execute `alert show`.
pub async fn execute_show(config: &Config, id: &str) -> Result<()> {
    let id = AlertId::new(id.trim());
    let alert = service(config)?.show(&id).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "alert.show",
            "alert": alert,
        }));
        return Ok(());
    }

    let Some(alert) = alert else {
        output::warning(&format!("Alert {id} not found"));
        return Ok(());
    };

    output::section(&format!("Alert {}", alert.id));
    output::field("Subscriber", &alert.subscriber_id);
    output::field("Destination", &alert.destination_id);
    output::field("Region", alert.region.as_str().to_uppercase());
    output::field("Direction", direction_label(alert.direction));
    output::field("Threshold", format!("{} gold", group_thousands(alert.threshold)));
    output::field("Created", alert.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    output::field(
        "Status",
        if alert.triggered {
            output::muted("triggered")
        } else {
            output::highlight("active")
        },
    );
    Ok(())
}
