//! Shared handler state.

use std::sync::Arc;
use std::time::Duration;

use overlay_core::{AssetId, SnapshotStore};

use crate::config::{DEFAULT_ASSET_ID, SourceKind};

/// Presentation settings for the overlay routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySettings {
    /// Asset used when a request omits `assetId`.
    pub default_asset_id: AssetId,
    /// Which upstream variant the snapshots come from.
    pub source: SourceKind,
    /// How often the overlay page polls the JSON endpoint.
    pub poll_interval: Duration,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            default_asset_id: AssetId::new(DEFAULT_ASSET_ID),
            source: SourceKind::Catalog,
            poll_interval: Duration::from_secs(10),
        }
    }
}

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Where snapshots are served from.
    pub store: Arc<dyn SnapshotStore>,
    /// Presentation settings.
    pub settings: Arc<OverlaySettings>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &"configured")
            .field("settings", &self.settings)
            .finish()
    }
}

impl AppState {
    /// Create handler state over a snapshot store.
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>, settings: OverlaySettings) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
        }
    }

    /// Resolves the requested asset, falling back to the default when the
    /// request names none or an empty one.
    #[must_use]
    pub fn asset_id_or_default(&self, requested: Option<String>) -> AssetId {
        requested
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .map_or_else(|| self.settings.default_asset_id.clone(), AssetId::new)
    }
}
