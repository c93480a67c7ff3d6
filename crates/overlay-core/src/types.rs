//! Core data types for asset statistics.
//!
//! This module defines the fundamental data structures:
//!
//! - [`AssetId`] - Caller-supplied asset identifier
//! - [`Snapshot`] - Immutable outcome of one fetch attempt
//! - [`SnapshotFields`] - Either the stats payload or an error message
//! - [`AssetStats`] - Stats payload of either upstream variant
//! - [`CollectibleStats`] - Limited-item availability (catalog details)
//! - [`SalesStats`] - Sales count and price (economy details)
//!
//! Snapshots serialize to a flat JSON object: `assetId` plus either the
//! success fields of the variant or a single `error` field.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// An asset identifier.
///
/// Opaque to the cache; fetchers decide whether they can use it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Creates a new asset identifier.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssetId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Availability of a limited item, from the catalog details endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CollectibleStats {
    /// Display name of the item.
    pub name: Option<String>,
    /// Units still available for purchase. Absent when the upstream omits
    /// the count or reports it as anything but an integer.
    pub copies_left: Option<i64>,
    /// Total units ever offered. Absent when the upstream omits the count or
    /// reports it as anything but an integer (`100.5`, `"100"`).
    pub total_copies: Option<i64>,
    /// Units sold, present only when both counts are known integers.
    pub sold: Option<i64>,
}

impl CollectibleStats {
    /// Creates collectible stats, deriving `sold` from the two counts.
    #[must_use]
    pub fn new(name: Option<String>, total_copies: Option<i64>, copies_left: Option<i64>) -> Self {
        let sold = match (total_copies, copies_left) {
            (Some(total), Some(left)) => total.checked_sub(left),
            _ => None,
        };
        Self {
            name,
            copies_left,
            total_copies,
            sold,
        }
    }
}

/// Sales figures of an asset, from the economy details endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SalesStats {
    /// Display name of the asset.
    pub name: Option<String>,
    /// Number of sales so far.
    pub sales: Option<i64>,
    /// Current price in Robux.
    pub price: Option<i64>,
}

/// Stats payload returned by one of the upstream variants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AssetStats {
    /// Catalog details (limited item availability).
    Collectible(CollectibleStats),
    /// Economy details (sales and price).
    Sales(SalesStats),
}

impl From<CollectibleStats> for AssetStats {
    fn from(stats: CollectibleStats) -> Self {
        Self::Collectible(stats)
    }
}

impl From<SalesStats> for AssetStats {
    fn from(stats: SalesStats) -> Self {
        Self::Sales(stats)
    }
}

/// Payload of a [`Snapshot`]: stats on success, a message on failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SnapshotFields {
    /// The fetch succeeded.
    Stats(AssetStats),
    /// The fetch failed.
    Error {
        /// Human-readable description of the failure.
        error: String,
    },
}

/// Immutable result of one fetch attempt for one asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// The asset this snapshot describes.
    #[serde(rename = "assetId")]
    pub asset_id: AssetId,
    /// Success stats or error message, never both.
    #[serde(flatten)]
    pub fields: SnapshotFields,
}

impl Snapshot {
    /// Creates a success snapshot.
    #[must_use]
    pub fn success(asset_id: AssetId, stats: impl Into<AssetStats>) -> Self {
        Self {
            asset_id,
            fields: SnapshotFields::Stats(stats.into()),
        }
    }

    /// Creates an error snapshot.
    #[must_use]
    pub fn failure(asset_id: AssetId, error: impl Into<String>) -> Self {
        Self {
            asset_id,
            fields: SnapshotFields::Error {
                error: error.into(),
            },
        }
    }

    /// Returns the stats if this snapshot is a success.
    #[must_use]
    pub const fn stats(&self) -> Option<&AssetStats> {
        match &self.fields {
            SnapshotFields::Stats(stats) => Some(stats),
            SnapshotFields::Error { .. } => None,
        }
    }

    /// Returns the error message if this snapshot is a failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.fields {
            SnapshotFields::Stats(_) => None,
            SnapshotFields::Error { error } => Some(error),
        }
    }

    /// Returns true if this snapshot records a failed fetch.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.fields, SnapshotFields::Error { .. })
    }
}
