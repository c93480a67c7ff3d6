//! Time-windowed snapshot cache.

use async_trait::async_trait;
use overlay_core::{AssetId, Snapshot, SnapshotSource, SnapshotStore};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{Instrument, debug, instrument, warn};

/// Default age after which a cached snapshot is refreshed.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Last fetch outcome for one asset.
///
/// Snapshot and fetch time are always written together.
#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: Snapshot,
    fetched_at: Instant,
}

impl CacheEntry {
    fn is_stale(&self, now: Instant, refresh_interval: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) > refresh_interval
    }
}

/// Per-asset slot. `None` until the first fetch completes.
type Slot = Arc<Mutex<Option<CacheEntry>>>;

/// In-memory read-through cache of asset snapshots.
///
/// Each asset gets its own lock, held across the staleness check, the upstream
/// fetch and the write-back. Concurrent lookups of one stale asset therefore
/// produce a single upstream call, while lookups of different assets never
/// wait on each other. The fetch and write-back run on a spawned task that
/// owns the lock, so they complete even if the caller that started them is
/// dropped. Entries live as long as the cache.
#[derive(Debug)]
pub struct SnapshotCache {
    source: Arc<dyn SnapshotSource>,
    refresh_interval: Duration,
    entries: RwLock<HashMap<AssetId, Slot>>,
}

impl SnapshotCache {
    /// Create an empty cache over `source` with the default refresh interval.
    #[must_use]
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self::with_refresh_interval(source, DEFAULT_REFRESH_INTERVAL)
    }

    /// Create an empty cache over `source` with a custom refresh interval.
    #[must_use]
    pub fn with_refresh_interval(source: Arc<dyn SnapshotSource>, refresh_interval: Duration) -> Self {
        Self {
            source,
            refresh_interval,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the refresh interval.
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Returns the number of assets that have been looked up.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no asset has been looked up yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Returns the slot for `asset_id`, creating it on first use.
    async fn slot(&self, asset_id: &AssetId) -> Slot {
        if let Some(slot) = self.entries.read().await.get(asset_id) {
            return Arc::clone(slot);
        }

        let mut entries = self.entries.write().await;
        Arc::clone(entries.entry(asset_id.clone()).or_default())
    }
}

#[async_trait]
impl SnapshotStore for SnapshotCache {
    #[instrument(skip(self, now), fields(asset_id = %asset_id))]
    async fn get_snapshot(&self, asset_id: &AssetId, now: Instant) -> Snapshot {
        let slot = self.slot(asset_id).await;
        let mut entry = slot.lock_owned().await;

        if let Some(cached) = entry
            .as_ref()
            .filter(|cached| !cached.is_stale(now, self.refresh_interval))
        {
            debug!("Cache hit for snapshot");
            return cached.snapshot.clone();
        }

        debug!(source = self.source.name(), "Snapshot missing or stale, refreshing");

        // The refresh task owns the slot guard, so dropping this caller does
        // not cancel the fetch or leave the slot empty for the next waiter.
        let source = Arc::clone(&self.source);
        let id = asset_id.clone();
        let refresh = tokio::spawn(
            async move {
                let snapshot = source.fetch(&id).await;
                *entry = Some(CacheEntry {
                    snapshot: snapshot.clone(),
                    fetched_at: now,
                });
                snapshot
            }
            .in_current_span(),
        );

        match refresh.await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Snapshot refresh task failed");
                Snapshot::failure(asset_id.clone(), format!("Refresh failed: {e}"))
            }
        }
    }
}
