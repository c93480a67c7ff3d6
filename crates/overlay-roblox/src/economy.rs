//! Economy asset details fetcher.

use std::time::Duration;

use async_trait::async_trait;
use overlay_core::{AssetId, AssetStats, FetchError, Result, SalesStats, SnapshotSource};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    Count, ECONOMY_ASSETS_URL, FetcherConfig, integer, numeric_id, text, transport_error,
};

/// Fetches sales count and price from the economy asset details API.
///
/// Sends one GET per lookup to `{base_url}/{id}/details`.
#[derive(Debug, Clone)]
pub struct EconomyFetcher {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl EconomyFetcher {
    /// Create an economy fetcher with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&FetcherConfig::default())
    }

    /// Create an economy fetcher with custom HTTP settings.
    pub fn with_config(config: &FetcherConfig) -> Result<Self> {
        Ok(Self::with_client(config.build_client()?, config.timeout))
    }

    /// Create an economy fetcher over an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            base_url: ECONOMY_ASSETS_URL.to_string(),
            timeout,
        }
    }

    /// Points the fetcher at a different assets base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn details_url(&self, id: u64) -> String {
        format!("{}/{}/details", self.base_url.trim_end_matches('/'), id)
    }
}

#[async_trait]
impl SnapshotSource for EconomyFetcher {
    fn name(&self) -> &str {
        "Roblox Economy"
    }

    #[instrument(skip(self), fields(asset_id = %asset_id))]
    async fn fetch_stats(&self, asset_id: &AssetId) -> Result<AssetStats> {
        let url = self.details_url(numeric_id(asset_id)?);
        debug!("Fetching economy details: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(&e, self.timeout))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let details: AssetDetails = response
            .json()
            .await
            .map_err(|e| transport_error(&e, self.timeout))?;

        Ok(SalesStats {
            name: text(details.name),
            sales: integer(details.sales.as_ref()),
            price: integer(details.price_in_robux.as_ref()),
        }
        .into())
    }
}

// ============================================================================
// Economy API Response Types
// ============================================================================

/// Asset details; every field may be missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AssetDetails {
    name: Option<serde_json::Value>,
    sales: Option<Count>,
    price_in_robux: Option<Count>,
}
