//! Periodic alert evaluation.
//!
//! # Architecture
//!
//! ```text
//! interval ──> AlertScheduler::tick
//!                 │
//!                 ├── AlertStore::list_all_active
//!                 ├── group by region (one price fetch per region)
//!                 ├── PriceFetcher::price ──> TokenCache ──> upstream
//!                 ├── Dispatcher::deliver   (best effort)
//!                 └── AlertStore::mark_triggered
//! ```
//!
//! Ticks never overlap: each one holds a [`TickGuard`] and a tick that finds
//! the guard taken is skipped.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::application::price::PriceFetcher;
use crate::domain::{Alert, Region};
use crate::error::Result;
use crate::port::outbound::notifier::{AlertNotification, Dispatcher};
use crate::port::outbound::store::AlertStore;

/// Counters describing one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Active alerts loaded at the start of the tick.
    pub alerts_checked: usize,
    /// Regions a price fetch was attempted for.
    pub regions_polled: usize,
    /// Regions whose price fetch failed.
    pub regions_failed: usize,
    /// Alerts whose condition held.
    pub triggered: usize,
    pub delivered: usize,
    pub delivery_failures: usize,
}

/// Marks a tick as in progress until dropped.
#[derive(Debug)]
pub struct TickGuard {
    running: Arc<AtomicBool>,
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

/// Handle for stopping a started scheduler.
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the tick loop and wait for it to exit.
    ///
    /// A tick already in flight is awaited, so its deliveries and marks
    /// complete before this returns.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "Scheduler task ended abnormally");
        }
    }
}

/// Fetches prices on a fixed interval and fires alerts whose condition holds.
///
/// Every triggered alert gets one delivery attempt and is then marked
/// triggered whether or not delivery succeeded.
pub struct AlertScheduler {
    store: Arc<dyn AlertStore>,
    fetcher: Arc<PriceFetcher>,
    dispatcher: Arc<dyn Dispatcher>,
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl AlertScheduler {
    pub fn new(
        store: Arc<dyn AlertStore>,
        fetcher: Arc<PriceFetcher>,
        dispatcher: Arc<dyn Dispatcher>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            fetcher,
            dispatcher,
            interval,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Claim the tick slot, or `None` if a tick is already running.
    pub fn try_begin_tick(&self) -> Option<TickGuard> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TickGuard {
                running: Arc::clone(&self.running),
            })
    }

    /// Run one evaluation pass.
    ///
    /// Per-region fetch failures, delivery failures and mark failures are
    /// logged and counted; only failing to load the active alerts is an error.
    ///
    /// # Errors
    ///
    /// Returns the store error if active alerts cannot be listed.
    pub async fn tick(&self) -> Result<TickReport> {
        let alerts = self.store.list_all_active().await?;
        if alerts.is_empty() {
            debug!("No active alerts, skipping price check");
            return Ok(TickReport::default());
        }

        let mut report = TickReport {
            alerts_checked: alerts.len(),
            ..TickReport::default()
        };

        for (region, alerts) in group_by_region(alerts) {
            report.regions_polled += 1;

            let quote = match self.fetcher.price(&region).await {
                Ok(quote) => quote,
                Err(e) => {
                    report.regions_failed += 1;
                    warn!(region = %region, error = %e, "Price fetch failed, skipping region");
                    continue;
                }
            };
            debug!(region = %region, price = quote.price, alerts = alerts.len(), "Evaluating alerts");

            for alert in alerts.iter().filter(|alert| alert.is_met_by(quote.price)) {
                report.triggered += 1;
                let notification = AlertNotification::new(alert, &quote);

                match self
                    .dispatcher
                    .deliver(&alert.destination_id, &notification)
                    .await
                {
                    Ok(()) => {
                        report.delivered += 1;
                        info!(
                            alert_id = %alert.id,
                            subscriber_id = %alert.subscriber_id,
                            direction = %alert.direction,
                            price = quote.price,
                            threshold = alert.threshold,
                            "Alert triggered"
                        );
                    }
                    Err(e) => {
                        report.delivery_failures += 1;
                        warn!(
                            alert_id = %alert.id,
                            dispatcher = self.dispatcher.name(),
                            error = %e,
                            "Alert delivery failed"
                        );
                    }
                }

                if let Err(e) = self.store.mark_triggered(&alert.id).await {
                    error!(alert_id = %alert.id, error = %e, "Failed to mark alert triggered");
                }
            }
        }

        Ok(report)
    }

    /// Spawn the tick loop. The first tick runs immediately.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let scheduler = Arc::new(self);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(scheduler.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(interval_secs = scheduler.interval.as_secs(), "Alert scheduler started");

            let mut in_flight: Option<JoinHandle<()>> = None;
            loop {
                tokio::select! {
                    result = shutdown_rx.changed() => {
                        if result.is_err() || *shutdown_rx.borrow() {
                            info!("Alert scheduler shutting down");
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        if let Some(tick) = Self::spawn_tick(&scheduler) {
                            in_flight = Some(tick);
                        }
                    }
                }
            }

            // Only the most recent tick can still hold the guard.
            if let Some(tick) = in_flight {
                if let Err(e) = tick.await {
                    warn!(error = %e, "In-flight tick ended abnormally");
                }
            }
        });

        SchedulerHandle { shutdown_tx, task }
    }

    /// Run one tick in its own task, or `None` if the previous one is
    /// still running.
    fn spawn_tick(scheduler: &Arc<Self>) -> Option<JoinHandle<()>> {
        let Some(guard) = scheduler.try_begin_tick() else {
            warn!("Skipping tick, previous tick still running");
            return None;
        };

        let scheduler = Arc::clone(scheduler);
        Some(tokio::spawn(async move {
            let _guard = guard;
            match scheduler.tick().await {
                Ok(report) if report.alerts_checked > 0 => info!(
                    alerts_checked = report.alerts_checked,
                    regions_polled = report.regions_polled,
                    regions_failed = report.regions_failed,
                    triggered = report.triggered,
                    delivered = report.delivered,
                    delivery_failures = report.delivery_failures,
                    "Tick complete"
                ),
                Ok(_) => {}
                Err(e) => error!(error = %e, "Tick failed"),
            }
        }))
    }
}

/// Partition alerts by region, keeping creation order within a region.
fn group_by_region(alerts: Vec<Alert>) -> BTreeMap<Region, Vec<Alert>> {
    let mut groups: BTreeMap<Region, Vec<Alert>> = BTreeMap::new();
    for alert in alerts {
        groups.entry(alert.region.clone()).or_default().push(alert);
    }
    groups
}
