#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ugc-overlay/ugc-overlay/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Snapshot cache for the UGC stats overlay.
//!
//! This crate provides [`SnapshotCache`], the in-memory implementation of the
//! [`SnapshotStore`] trait from `overlay-core`.

/// Time-windowed snapshot cache.
pub mod snapshot;

// Re-export the trait for convenience
pub use overlay_core::SnapshotStore;

pub use snapshot::{DEFAULT_REFRESH_INTERVAL, SnapshotCache};
