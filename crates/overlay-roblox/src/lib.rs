#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ugc-overlay/ugc-overlay/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Roblox upstream fetchers.
//!
//! This crate provides two implementations of the [`SnapshotSource`] trait
//! from `overlay-core`:
//!
//! - [`CatalogFetcher`] - Catalog items details (limited-item availability)
//! - [`EconomyFetcher`] - Economy asset details (sales and price)
//!
//! # Example
//!
//! ```no_run
//! use overlay_core::{AssetId, SnapshotSource};
//! use overlay_roblox::CatalogFetcher;
//!
//! # async fn example() -> overlay_core::Result<()> {
//! let fetcher = CatalogFetcher::new()?;
//! let snapshot = fetcher.fetch(&AssetId::new("116103195460500")).await;
//! println!("{}", serde_json::to_string(&snapshot).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use overlay_core::{AssetId, FetchError, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;

/// Catalog items details fetcher.
pub mod catalog;
/// Economy asset details fetcher.
pub mod economy;

pub use catalog::CatalogFetcher;
pub use economy::EconomyFetcher;
pub use overlay_core::SnapshotSource;

/// Catalog items details endpoint.
pub const CATALOG_DETAILS_URL: &str = "https://catalog.roblox.com/v1/catalog/items/details";

/// Economy assets base URL; details live at `{base}/{id}/details`.
pub const ECONOMY_ASSETS_URL: &str = "https://economy.roblox.com/v2/assets";

/// User agent for HTTP requests.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; UGCOverlay/1.0)";

/// Default upstream call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP settings shared by the fetchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Timeout for a whole upstream call, body included.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl FetcherConfig {
    /// Sets the upstream call timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds an HTTP client carrying the fixed header set and timeout.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))
    }
}

/// Maps a transport error, keeping timeouts distinct.
pub(crate) fn transport_error(e: &reqwest::Error, timeout: Duration) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(timeout)
    } else if e.is_decode() {
        FetchError::Parse(e.to_string())
    } else {
        FetchError::Network(e.to_string())
    }
}

/// Returns the asset id as the numeric id Roblox expects.
pub(crate) fn numeric_id(asset_id: &AssetId) -> Result<u64> {
    asset_id
        .as_str()
        .parse()
        .map_err(|_| FetchError::InvalidAssetId(asset_id.to_string()))
}

/// A count field that may hold something other than an integer.
///
/// Keeps "absent" (`Option::None`) apart from "present but not an integer"
/// (`Count::Other`), so derived values can require real integers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum Count {
    Integer(i64),
    Other(serde_json::Value),
}

impl Count {
    pub(crate) const fn integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Other(_) => None,
        }
    }
}

/// Integer value of an optional count, `None` if absent or not an integer.
pub(crate) fn integer(count: Option<&Count>) -> Option<i64> {
    count.and_then(Count::integer)
}

/// String value of an optional display field, `None` if absent or not a string.
pub(crate) fn text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id() {
        assert_eq!(numeric_id(&AssetId::new("116103195460500")), Ok(116103195460500));
        assert_eq!(
            numeric_id(&AssetId::new("abc")),
            Err(FetchError::InvalidAssetId("abc".to_string()))
        );
        assert!(numeric_id(&AssetId::new("../1")).is_err());
    }

    #[test]
    fn test_count_distinguishes_wrong_type() {
        let count: Count = serde_json::from_str("100").unwrap();
        assert_eq!(count.integer(), Some(100));

        let count: Count = serde_json::from_str("100.5").unwrap();
        assert_eq!(count.integer(), None);

        let count: Count = serde_json::from_str("\"100\"").unwrap();
        assert_eq!(count.integer(), None);
    }

    #[test]
    fn test_text_ignores_wrong_type() {
        assert_eq!(text(Some(serde_json::json!("Crown"))), Some("Crown".to_string()));
        assert_eq!(text(Some(serde_json::json!(42))), None);
        assert_eq!(text(Some(serde_json::Value::Null)), None);
        assert_eq!(text(None), None);
    }

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, USER_AGENT);
        assert!(config.build_client().is_ok());
    }
}
