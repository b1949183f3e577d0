//! Blizzard Battle.net REST client.
//!
//! Covers the two calls the price monitor needs:
//! - **OAuth** (`{region}.battle.net/oauth/token`) - client-credentials grant
//! - **Game Data** (`{region}.api.blizzard.com/data/wow/token/index`) - the
//!   current WoW Token price in copper
//!
//! Non-success statuses become [`UpstreamError`]s. Nothing is retried here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};
use url::Url;

use super::dto::{TokenPriceResponse, TokenResponse};
use crate::domain::Region;
use crate::error::{Result, UpstreamError};
use crate::infrastructure::config::upstream::{
    BlizzardCredentials, UpstreamConfig, REGION_PLACEHOLDER,
};
use crate::port::outbound::upstream::{CredentialExchange, IssuedToken, PriceQuery, RawPrice};

/// HTTP client for the Blizzard OAuth and Game Data APIs.
pub struct BlizzardClient {
    http: HttpClient,
    oauth_url: String,
    api_url: String,
    locale: String,
    credentials: BlizzardCredentials,
}

impl BlizzardClient {
    #[must_use]
    pub fn from_config(config: &UpstreamConfig, credentials: BlizzardCredentials) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            oauth_url: config.oauth_url.clone(),
            api_url: config.api_url.clone(),
            locale: config.locale.clone(),
            credentials,
        }
    }

    /// Substitute `region` into a URL template.
    fn region_url(template: &str, region: &Region) -> Result<Url> {
        Ok(Url::parse(&template.replace(REGION_PLACEHOLDER, region.as_str()))?)
    }

    /// Full price query URL for `region`.
    fn price_url(&self, region: &Region) -> Result<Url> {
        let mut url = Self::region_url(&self.api_url, region)?;
        url.query_pairs_mut()
            .append_pair("namespace", &format!("dynamic-{region}"))
            .append_pair("locale", &self.locale);
        Ok(url)
    }
}

#[async_trait]
impl CredentialExchange for BlizzardClient {
    async fn exchange(&self, region: &Region) -> Result<IssuedToken> {
        let url = Self::region_url(&self.oauth_url, region)?;
        debug!(region = %region, "Requesting access token");

        let response = self
            .http
            .post(url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Credential {
                region: region.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body: TokenResponse = response.json().await?;
        Ok(IssuedToken {
            access_token: body.access_token,
            lifetime: Duration::from_secs(body.expires_in),
        })
    }
}

#[async_trait]
impl PriceQuery for BlizzardClient {
    async fn query(&self, region: &Region, token: &str) -> Result<RawPrice> {
        let url = self.price_url(region)?;
        debug!(region = %region, "Fetching token price");

        let response = self.http.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::PriceQuery {
                region: region.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body: TokenPriceResponse = response.json().await?;
        Ok(RawPrice {
            price_minor: body.price,
            last_updated_millis: body.last_updated_timestamp,
        })
    }
}
