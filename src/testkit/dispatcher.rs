//! Recording dispatcher for delivery assertions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::DestinationId;
use crate::error::{Error, Result};
use crate::port::outbound::notifier::{AlertNotification, Dispatcher};

/// Collects every delivery attempt. Can be switched to fail or to stall.
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    deliveries: Arc<Mutex<Vec<(DestinationId, AlertNotification)>>>,
    failing: Arc<AtomicBool>,
    delay: Arc<Mutex<Duration>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher whose deliveries all fail (attempts are still recorded).
    pub fn failing() -> Self {
        let dispatcher = Self::default();
        dispatcher.set_failing(true);
        dispatcher
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Sleep for `delay` before recording each delivery.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = delay;
    }

    /// Number of delivery attempts.
    pub fn len(&self) -> usize {
        self.deliveries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn deliveries(&self) -> Vec<(DestinationId, AlertNotification)> {
        self.deliveries.lock().clone()
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn deliver(
        &self,
        destination: &DestinationId,
        notification: &AlertNotification,
    ) -> Result<()> {
        let delay = *self.delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.deliveries
            .lock()
            .push((destination.clone(), notification.clone()));

        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Delivery("recording dispatcher set to fail".into()));
        }
        Ok(())
    }
}
