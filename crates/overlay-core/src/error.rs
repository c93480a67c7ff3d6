//! Error types for fetch operations.
//!
//! This module defines [`FetchError`] which covers every way an upstream fetch
//! can fail. Errors never leave the fetch boundary as faults: the
//! [`SnapshotSource`](crate::SnapshotSource) folds them into an error
//! [`Snapshot`](crate::Snapshot) whose message is the error's `Display` text.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while fetching asset statistics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network-related errors (connection failures, DNS, TLS, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// The upstream call did not complete within the configured timeout.
    #[error("Upstream request timed out after {0:?}")]
    Timeout(Duration),

    /// The upstream service answered with a non-success status.
    #[error("Upstream returned HTTP {status}")]
    Status {
        /// The HTTP status code returned by the upstream service.
        status: u16,
    },

    /// The upstream answered successfully but carried no item data.
    #[error("No data from source")]
    NoData,

    /// Error decoding the upstream response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The asset identifier cannot be used to build an upstream request.
    #[error("Invalid asset id: {0}")]
    InvalidAssetId(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`FetchError`].
pub type Result<T> = std::result::Result<T, FetchError>;
