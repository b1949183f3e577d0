//! Scripted upstream fakes for the credential exchange and price query ports.
//!
//! - [`ScriptedExchange`] - issues `token-{region}-{n}` tokens with a fixed
//!   lifetime, or fails per region with a chosen status.
//! - [`ScriptedPrices`] - returns per-region copper prices, or fails per
//!   region. Records every token it was called with.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::Region;
use crate::error::{Result, UpstreamError};
use crate::port::outbound::upstream::{CredentialExchange, IssuedToken, PriceQuery, RawPrice};

/// Timestamp reported by [`ScriptedPrices`] unless overridden (2026-01-01T00:00:00Z).
pub const DEFAULT_LAST_UPDATED_MILLIS: i64 = 1_767_225_600_000;

// ---------------------------------------------------------------------------
// ScriptedExchange
// ---------------------------------------------------------------------------

/// A credential exchange that counts calls and can fail selected regions.
pub struct ScriptedExchange {
    lifetime: Duration,
    calls: AtomicUsize,
    issued: Mutex<HashMap<Region, usize>>,
    history: Mutex<Vec<Region>>,
    failures: Mutex<HashMap<Region, u16>>,
}

impl ScriptedExchange {
    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            lifetime,
            calls: AtomicUsize::new(0),
            issued: Mutex::new(HashMap::new()),
            history: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Make every exchange for `region` fail with `status`.
    pub fn fail_region(&self, region: &str, status: u16) {
        self.failures.lock().insert(Region::new(region), status);
    }

    /// Stop failing `region`.
    pub fn recover_region(&self, region: &str) {
        self.failures.lock().remove(&Region::new(region));
    }

    /// Total exchange calls, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Regions in the order they were requested.
    pub fn regions(&self) -> Vec<Region> {
        self.history.lock().clone()
    }
}

#[async_trait]
impl CredentialExchange for ScriptedExchange {
    async fn exchange(&self, region: &Region) -> Result<IssuedToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.history.lock().push(region.clone());

        if let Some(status) = self.failures.lock().get(region).copied() {
            return Err(UpstreamError::Credential {
                region: region.to_string(),
                status,
            }
            .into());
        }

        let mut issued = self.issued.lock();
        let n = issued.entry(region.clone()).or_insert(0);
        *n += 1;

        Ok(IssuedToken {
            access_token: format!("token-{region}-{n}"),
            lifetime: self.lifetime,
        })
    }
}

// ---------------------------------------------------------------------------
// ScriptedPrices
// ---------------------------------------------------------------------------

/// A price query with settable per-region prices.
///
/// Regions without a price fail with status 404.
#[derive(Default)]
pub struct ScriptedPrices {
    prices: Mutex<HashMap<Region, u64>>,
    failures: Mutex<HashSet<Region>>,
    statuses: Mutex<HashMap<Region, u16>>,
    calls: AtomicUsize,
    queried: Mutex<Vec<Region>>,
    tokens: Mutex<Vec<String>>,
}

impl ScriptedPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price for `region` in copper.
    pub fn set_copper(&self, region: &str, copper: u64) {
        let region = Region::new(region);
        self.failures.lock().remove(&region);
        self.prices.lock().insert(region, copper);
    }

    /// Set the price for `region` in whole gold.
    pub fn set_gold(&self, region: &str, gold: u64) {
        self.set_copper(region, gold * crate::domain::price::COPPER_PER_GOLD);
    }

    /// Make queries for `region` fail with `status`.
    pub fn fail_region(&self, region: &str, status: u16) {
        let region = Region::new(region);
        self.statuses.lock().insert(region.clone(), status);
        self.failures.lock().insert(region);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Regions in the order they were queried.
    pub fn queried(&self) -> Vec<Region> {
        self.queried.lock().clone()
    }

    /// Tokens presented, in call order.
    pub fn tokens_seen(&self) -> Vec<String> {
        self.tokens.lock().clone()
    }
}

#[async_trait]
impl PriceQuery for ScriptedPrices {
    async fn query(&self, region: &Region, token: &str) -> Result<RawPrice> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().push(region.clone());
        self.tokens.lock().push(token.to_string());

        if self.failures.lock().contains(region) {
            let status = self.statuses.lock().get(region).copied().unwrap_or(500);
            return Err(UpstreamError::PriceQuery {
                region: region.to_string(),
                status,
            }
            .into());
        }

        let price = self.prices.lock().get(region).copied();
        match price {
            Some(price_minor) => Ok(RawPrice {
                price_minor,
                last_updated_millis: DEFAULT_LAST_UPDATED_MILLIS,
            }),
            None => Err(UpstreamError::PriceQuery {
                region: region.to_string(),
                status: 404,
            }
            .into()),
        }
    }
}
