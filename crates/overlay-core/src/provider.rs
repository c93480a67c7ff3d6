//! Upstream source trait.
//!
//! A [`SnapshotSource`] performs the network call for one asset and turns the
//! outcome into a [`Snapshot`]. Implementors only write
//! [`fetch_stats`](SnapshotSource::fetch_stats); the provided
//! [`fetch`](SnapshotSource::fetch) folds any [`FetchError`](crate::FetchError)
//! into an error snapshot so callers never see a fault.

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{
    error::Result,
    types::{AssetId, AssetStats, Snapshot},
};

/// Upstream service that can produce statistics for an asset.
#[async_trait]
pub trait SnapshotSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "Roblox Catalog").
    fn name(&self) -> &str;

    /// Fetches and decodes the statistics for one asset.
    async fn fetch_stats(&self, asset_id: &AssetId) -> Result<AssetStats>;

    /// Fetches a snapshot for one asset.
    ///
    /// Never fails: transport errors, upstream rejections and malformed
    /// responses all become an error snapshot carrying the asset id and the
    /// error's description.
    async fn fetch(&self, asset_id: &AssetId) -> Snapshot {
        match self.fetch_stats(asset_id).await {
            Ok(stats) => {
                debug!(source = self.name(), asset_id = %asset_id, "Fetched asset stats");
                Snapshot::success(asset_id.clone(), stats)
            }
            Err(e) => {
                warn!(
                    source = self.name(),
                    asset_id = %asset_id,
                    error = %e,
                    "Upstream fetch failed"
                );
                Snapshot::failure(asset_id.clone(), e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, SalesStats};

    #[derive(Debug)]
    struct Fixed(Result<AssetStats>);

    #[async_trait]
    impl SnapshotSource for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_stats(&self, _asset_id: &AssetId) -> Result<AssetStats> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_fetch_wraps_success() {
        let stats = AssetStats::Sales(SalesStats {
            name: Some("Shirt".into()),
            sales: Some(5),
            price: Some(10),
        });
        let source = Fixed(Ok(stats.clone()));

        let snapshot = source.fetch(&AssetId::new("1")).await;
        assert_eq!(snapshot, Snapshot::success(AssetId::new("1"), stats));
    }

    #[tokio::test]
    async fn test_fetch_folds_error_into_snapshot() {
        let source = Fixed(Err(FetchError::Status { status: 500 }));

        let snapshot = source.fetch(&AssetId::new("1")).await;
        assert!(snapshot.stats().is_none());
        assert_eq!(snapshot.error(), Some("Upstream returned HTTP 500"));
        assert_eq!(snapshot.asset_id.as_str(), "1");
    }
}
