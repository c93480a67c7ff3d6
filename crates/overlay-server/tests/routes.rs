use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use overlay_cache::SnapshotCache;
use overlay_core::{AssetId, AssetStats, CollectibleStats, FetchError, Result, SnapshotSource};
use overlay_server::{AppState, OverlaySettings, SourceKind, router};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Catalog stand-in: asset 999 has no data, everything else is a crown.
#[derive(Debug, Default)]
struct FakeCatalog {
    calls: AtomicUsize,
}

#[async_trait]
impl SnapshotSource for FakeCatalog {
    fn name(&self) -> &str {
        "fake catalog"
    }

    async fn fetch_stats(&self, asset_id: &AssetId) -> Result<AssetStats> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if asset_id.as_str() == "999" {
            return Err(FetchError::NoData);
        }
        Ok(CollectibleStats::new(Some("Crown".into()), Some(100), Some(37)).into())
    }
}

fn app(source: &Arc<FakeCatalog>, settings: OverlaySettings) -> axum::Router {
    let cache = SnapshotCache::new(Arc::clone(source) as Arc<dyn SnapshotSource>);
    router(AppState::new(Arc::new(cache), settings))
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

async fn get_json(app: &axum::Router, uri: &str) -> Value {
    let (status, _, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_snapshot_json_success() {
    let source = Arc::new(FakeCatalog::default());
    let app = app(&source, OverlaySettings::default());

    let (status, headers, body) = get(&app, "/ugc?assetId=42&_=1700000000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({
            "assetId": "42",
            "name": "Crown",
            "copies_left": 37,
            "total_copies": 100,
            "sold": 63,
        })
    );
}

#[tokio::test]
async fn test_snapshot_json_defaults_asset_id() {
    let source = Arc::new(FakeCatalog::default());
    let app = app(&source, OverlaySettings::default());

    let body = get_json(&app, "/ugc").await;
    assert_eq!(body["assetId"], "116103195460500");

    let body = get_json(&app, "/ugc?assetId=").await;
    assert_eq!(body["assetId"], "116103195460500");
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_source_error_is_cached() {
    let source = Arc::new(FakeCatalog::default());
    let app = app(&source, OverlaySettings::default());

    let first = get_json(&app, "/ugc?assetId=999").await;
    let second = get_json(&app, "/ugc?assetId=999").await;

    assert_eq!(first, json!({ "assetId": "999", "error": "No data from source" }));
    assert_eq!(first, second);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_overlay_page() {
    let source = Arc::new(FakeCatalog::default());
    let app = app(&source, OverlaySettings::default());

    let (status, headers, body) = get(&app, "/?assetId=42&size=72").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(html.contains("font-size: 72px;"));
    assert!(html.contains(r#"const ASSET_ID = "42";"#));
    assert!(html.contains("Copies Left: "));
    // Rendering the page does not touch the upstream.
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_overlay_page_economy_defaults() {
    let source = Arc::new(FakeCatalog::default());
    let settings = OverlaySettings {
        source: SourceKind::Economy,
        ..OverlaySettings::default()
    };
    let app = app(&source, settings);

    let (_, _, body) = get(&app, "/?size=huge").await;
    let html = String::from_utf8(body).unwrap();

    assert!(html.contains("font-size: 48px;"));
    assert!(html.contains(r#"const ASSET_ID = "116103195460500";"#));
    assert!(html.contains("Sales: "));
}

#[tokio::test]
async fn test_health() {
    let source = Arc::new(FakeCatalog::default());
    let app = app(&source, OverlaySettings::default());

    assert_eq!(get_json(&app, "/health").await, json!({ "status": "ok" }));
}
