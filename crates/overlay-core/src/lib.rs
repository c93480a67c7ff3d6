#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ugc-overlay/ugc-overlay/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the UGC stats overlay.
//!
//! This crate provides the foundational abstractions shared by the fetchers,
//! the cache and the HTTP server:
//!
//! - [`SnapshotSource`](provider::SnapshotSource) - Upstream fetcher trait
//! - [`SnapshotStore`](cache::SnapshotStore) - Read-through cache trait
//! - [`Snapshot`](types::Snapshot) - Outcome of one fetch attempt

/// Cache trait for serving snapshots.
pub mod cache;
/// Error types for fetch operations.
pub mod error;
/// Upstream source trait.
pub mod provider;
/// Core data types (AssetId, Snapshot, stats payloads).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::SnapshotStore;
pub use error::{FetchError, Result};
pub use provider::SnapshotSource;
pub use types::{AssetId, AssetStats, CollectibleStats, SalesStats, Snapshot, SnapshotFields};
