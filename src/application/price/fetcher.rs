//! Current price lookup on top of the token cache.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::token::TokenCache;
use crate::domain::{copper_to_gold, PriceQuote, Region};
use crate::error::{Error, Result};
use crate::port::outbound::upstream::PriceQuery;

/// Fetches the current token price for a region, in gold.
pub struct PriceFetcher {
    tokens: Arc<TokenCache>,
    query: Arc<dyn PriceQuery>,
}

impl PriceFetcher {
    pub fn new(tokens: Arc<TokenCache>, query: Arc<dyn PriceQuery>) -> Self {
        Self { tokens, query }
    }

    /// Current price quote for `region`.
    ///
    /// # Errors
    ///
    /// Fails when the credential exchange or price query fails, or the
    /// reported timestamp is out of range.
    pub async fn price(&self, region: &Region) -> Result<PriceQuote> {
        let token = self.tokens.token(region).await?;
        let raw = self.query.query(region, &token).await?;

        let last_updated: DateTime<Utc> = DateTime::from_timestamp_millis(raw.last_updated_millis)
            .ok_or_else(|| {
                Error::Parse(format!(
                    "invalid last_updated_timestamp {}",
                    raw.last_updated_millis
                ))
            })?;
        let price = copper_to_gold(raw.price_minor);
        debug!(region = %region, price, "Fetched token price");

        Ok(PriceQuote {
            region: region.clone(),
            price,
            last_updated,
        })
    }
}
