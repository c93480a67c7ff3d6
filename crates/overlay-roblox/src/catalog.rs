//! Catalog items details fetcher.

use std::time::Duration;

use async_trait::async_trait;
use overlay_core::{AssetId, AssetStats, CollectibleStats, FetchError, Result, SnapshotSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    CATALOG_DETAILS_URL, Count, FetcherConfig, integer, numeric_id, text, transport_error,
};

/// Fetches limited-item availability from the catalog items details API.
///
/// Sends one POST per lookup with an `items` list holding the single asset.
#[derive(Debug, Clone)]
pub struct CatalogFetcher {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl CatalogFetcher {
    /// Create a catalog fetcher with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&FetcherConfig::default())
    }

    /// Create a catalog fetcher with custom HTTP settings.
    pub fn with_config(config: &FetcherConfig) -> Result<Self> {
        Ok(Self::with_client(config.build_client()?, config.timeout))
    }

    /// Create a catalog fetcher over an existing HTTP client.
    ///
    /// `timeout` is only used to describe timeouts; the client enforces its own.
    #[must_use]
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            url: CATALOG_DETAILS_URL.to_string(),
            timeout,
        }
    }

    /// Points the fetcher at a different details endpoint.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[async_trait]
impl SnapshotSource for CatalogFetcher {
    fn name(&self) -> &str {
        "Roblox Catalog"
    }

    #[instrument(skip(self), fields(asset_id = %asset_id))]
    async fn fetch_stats(&self, asset_id: &AssetId) -> Result<AssetStats> {
        let request = DetailsRequest {
            items: vec![ItemRef {
                item_type: "Asset",
                id: numeric_id(asset_id)?,
            }],
        };

        debug!("Fetching catalog details: {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(&e, self.timeout))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let details: DetailsResponse = response
            .json()
            .await
            .map_err(|e| transport_error(&e, self.timeout))?;

        parse_details(details)
    }
}

/// Extracts the first item's stats from a details response.
fn parse_details(details: DetailsResponse) -> Result<AssetStats> {
    let item = details
        .data
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or(FetchError::NoData)?;

    let total = integer(item.total_quantity.as_ref());
    let left = integer(item.units_available_for_consumption.as_ref());
    if total.is_none() || left.is_none() {
        debug!(
            total_quantity = ?item.total_quantity,
            units_available = ?item.units_available_for_consumption,
            "Item counts missing or not integers, units sold unknown"
        );
    }

    Ok(CollectibleStats::new(text(item.name), total, left).into())
}

// ============================================================================
// Catalog API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct DetailsRequest {
    items: Vec<ItemRef>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemRef {
    item_type: &'static str,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    data: Option<Vec<CatalogItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogItem {
    name: Option<serde_json::Value>,
    total_quantity: Option<Count>,
    units_available_for_consumption: Option<Count>,
}
