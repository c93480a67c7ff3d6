//! HTTP routes.
//!
//! - `GET /ugc` - current snapshot as JSON, always `200 OK`; failures are
//!   reported in the snapshot's `error` field
//! - `GET /` - overlay page polling `/ugc`
//! - `GET /health` - liveness check

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use overlay_core::SnapshotStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::overlay::{OverlayPage, font_size};
use crate::state::AppState;

/// Query parameters accepted by the JSON and overlay routes.
#[derive(Debug, Default, Deserialize)]
pub struct AssetQuery {
    /// Requested asset; the configured default when absent.
    #[serde(rename = "assetId")]
    pub asset_id: Option<String>,
    /// Overlay font size in pixels.
    pub size: Option<String>,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(overlay_page))
        .route("/ugc", get(snapshot_json))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn snapshot_json(
    State(state): State<AppState>,
    Query(query): Query<AssetQuery>,
) -> impl IntoResponse {
    let asset_id = state.asset_id_or_default(query.asset_id);
    let snapshot = state.store.snapshot(&asset_id).await;
    debug!(asset_id = %asset_id, error = snapshot.is_error(), "Serving snapshot");

    ([(header::CACHE_CONTROL, "no-store")], Json(snapshot))
}

async fn overlay_page(
    State(state): State<AppState>,
    Query(query): Query<AssetQuery>,
) -> Html<String> {
    let page = OverlayPage {
        asset_id: state.asset_id_or_default(query.asset_id),
        font_size: font_size(query.size.as_deref()),
        source: state.settings.source,
        poll_interval: state.settings.poll_interval,
    };

    Html(page.render())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
