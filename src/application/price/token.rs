//! Per-region bearer token cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::domain::Region;
use crate::error::Result;
use crate::port::outbound::upstream::CredentialExchange;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Caches one bearer token per region and renews it on expiry.
///
/// An entry expires `safety_margin` before the lifetime reported by the
/// authorization server. Exchange failures are returned to the caller and
/// leave the cache untouched.
pub struct TokenCache {
    exchange: Arc<dyn CredentialExchange>,
    safety_margin: Duration,
    entries: RwLock<HashMap<Region, CachedToken>>,
}

impl TokenCache {
    pub fn new(exchange: Arc<dyn CredentialExchange>, safety_margin: Duration) -> Self {
        Self {
            exchange,
            safety_margin,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// A valid token for `region`, exchanging credentials if needed.
    ///
    /// # Errors
    ///
    /// Returns the credential exchange error; nothing is cached on failure.
    pub async fn token(&self, region: &Region) -> Result<String> {
        self.token_at(region, Utc::now()).await
    }

    /// Same as [`Self::token`] with an explicit clock reading.
    pub async fn token_at(&self, region: &Region, now: DateTime<Utc>) -> Result<String> {
        if let Some(cached) = self.cached(region, now) {
            debug!(region = %region, "Using cached access token");
            return Ok(cached);
        }

        let issued = self.exchange.exchange(region).await?;
        let expires_at = expiry(now, issued.lifetime, self.safety_margin);

        self.entries.write().insert(
            region.clone(),
            CachedToken {
                token: issued.access_token.clone(),
                expires_at,
            },
        );
        info!(region = %region, expires_at = %expires_at, "Obtained new access token");

        Ok(issued.access_token)
    }

    fn cached(&self, region: &Region, now: DateTime<Utc>) -> Option<String> {
        self.entries
            .read()
            .get(region)
            .filter(|entry| entry.is_valid_at(now))
            .map(|entry| entry.token.clone())
    }

    /// Number of regions with a cached entry, valid or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `now + lifetime - margin`, saturating on out-of-range durations.
fn expiry(now: DateTime<Utc>, lifetime: Duration, margin: Duration) -> DateTime<Utc> {
    let usable = lifetime.saturating_sub(margin);
    chrono::Duration::from_std(usable)
        .ok()
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(now)
}
