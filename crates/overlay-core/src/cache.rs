//! Cache trait for serving asset snapshots.
//!
//! This module defines the [`SnapshotStore`] trait: a read-through store that
//! answers every lookup with some [`Snapshot`], refreshing from an upstream
//! [`SnapshotSource`](crate::SnapshotSource) when the stored one is stale.

use async_trait::async_trait;
use std::time::Instant;

use crate::types::{AssetId, Snapshot};

/// Read-through store of the latest snapshot per asset.
///
/// Implementations decide when a stored snapshot is stale and refresh it
/// through their upstream source.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Returns the current snapshot for `asset_id` as of `now`, refreshing
    /// it first if it is stale or was never fetched.
    ///
    /// Never fails; upstream failures are returned as error snapshots.
    async fn get_snapshot(&self, asset_id: &AssetId, now: Instant) -> Snapshot;

    /// Returns the current snapshot for `asset_id` using the wall clock.
    async fn snapshot(&self, asset_id: &AssetId) -> Snapshot {
        self.get_snapshot(asset_id, Instant::now()).await
    }
}
