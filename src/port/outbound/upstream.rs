//! Upstream price API ports.
//!
//! The wire calls live in adapters; the token cache and price fetcher in
//! `application::price` depend only on these traits.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::Region;
use crate::error::Result;

/// A freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime reported by the authorization server.
    pub lifetime: Duration,
}

/// Raw price as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPrice {
    /// Price in copper.
    pub price_minor: u64,
    /// Upstream's last update, epoch milliseconds.
    pub last_updated_millis: i64,
}

/// Client-credentials exchange against the upstream authorization service.
#[async_trait]
pub trait CredentialExchange: Send + Sync {
    /// Obtain a new bearer token for `region`.
    ///
    /// # Errors
    ///
    /// Non-success responses are returned as errors; no retry is attempted.
    async fn exchange(&self, region: &Region) -> Result<IssuedToken>;
}

/// Price query against the upstream data API.
#[async_trait]
pub trait PriceQuery: Send + Sync {
    /// Fetch the current raw price for `region` using `token`.
    ///
    /// # Errors
    ///
    /// Non-success responses are returned as errors.
    async fn query(&self, region: &Region, token: &str) -> Result<RawPrice>;
}
