#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ugc-overlay/ugc-overlay/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! HTTP presentation layer for the UGC stats overlay.
//!
//! - [`Config`] - Command line and environment configuration
//! - [`AppState`] - Snapshot store and overlay settings shared by handlers
//! - [`router`] - The axum router serving JSON, overlay and health routes

/// Command line and environment configuration.
pub mod config;
/// Overlay page rendering.
pub mod overlay;
/// HTTP routes.
pub mod routes;
/// Shared handler state.
pub mod state;

pub use config::{Config, SourceKind};
pub use routes::router;
pub use state::{AppState, OverlaySettings};
