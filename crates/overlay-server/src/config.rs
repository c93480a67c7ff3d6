//! Command line and environment configuration.
//!
//! Every flag falls back to an `OVERLAY_*` environment variable, which may
//! come from a `.env` file loaded at startup.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use overlay_core::{AssetId, SnapshotSource};
use overlay_roblox::{
    CATALOG_DETAILS_URL, CatalogFetcher, ECONOMY_ASSETS_URL, EconomyFetcher, FetcherConfig,
};

use crate::state::OverlaySettings;

/// Asset shown when a request names none.
pub const DEFAULT_ASSET_ID: &str = "116103195460500";

/// Upstream endpoint the stats are read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Catalog items details: copies left out of total copies.
    #[default]
    Catalog,
    /// Economy asset details: sales count and price.
    Economy,
}

/// UGC stats overlay server configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "overlay-server", version)]
#[command(about = "Caching proxy and browser overlay for Roblox UGC stats")]
pub struct Config {
    /// Address to listen on
    #[arg(short, long, env = "OVERLAY_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Upstream endpoint to read stats from
    #[arg(long, env = "OVERLAY_SOURCE", value_enum, default_value_t = SourceKind::Catalog)]
    pub source: SourceKind,

    /// Asset id used when a request omits `assetId`
    #[arg(long, env = "OVERLAY_DEFAULT_ASSET_ID", default_value = DEFAULT_ASSET_ID)]
    pub default_asset_id: String,

    /// Seconds a fetched snapshot is served before it is refreshed
    #[arg(long, env = "OVERLAY_REFRESH_SECS", default_value_t = 10)]
    pub refresh_secs: u64,

    /// Seconds before an upstream call is abandoned
    #[arg(
        long,
        env = "OVERLAY_UPSTREAM_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub upstream_timeout_secs: u64,

    /// Seconds between overlay polls of the JSON endpoint
    #[arg(
        long,
        env = "OVERLAY_POLL_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_secs: u64,

    /// Catalog items details endpoint
    #[arg(long, env = "OVERLAY_CATALOG_URL", default_value = CATALOG_DETAILS_URL)]
    pub catalog_url: String,

    /// Economy assets base URL
    #[arg(long, env = "OVERLAY_ECONOMY_URL", default_value = ECONOMY_ASSETS_URL)]
    pub economy_url: String,
}

impl Config {
    /// Age after which a cached snapshot is refreshed.
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// HTTP settings for the upstream fetcher.
    #[must_use]
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig::default().with_timeout(Duration::from_secs(self.upstream_timeout_secs))
    }

    /// Builds the upstream fetcher selected by `source`.
    pub fn build_source(&self) -> overlay_core::Result<Arc<dyn SnapshotSource>> {
        let fetcher_config = self.fetcher_config();
        let source: Arc<dyn SnapshotSource> = match self.source {
            SourceKind::Catalog => Arc::new(
                CatalogFetcher::with_config(&fetcher_config)?.with_url(self.catalog_url.as_str()),
            ),
            SourceKind::Economy => Arc::new(
                EconomyFetcher::with_config(&fetcher_config)?
                    .with_base_url(self.economy_url.as_str()),
            ),
        };
        Ok(source)
    }

    /// Settings for the presentation routes.
    #[must_use]
    pub fn settings(&self) -> OverlaySettings {
        OverlaySettings {
            default_asset_id: AssetId::new(self.default_asset_id.as_str()),
            source: self.source,
            poll_interval: Duration::from_secs(self.poll_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["overlay-server"]).unwrap();

        assert_eq!(config.listen, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.source, SourceKind::Catalog);
        assert_eq!(config.default_asset_id, DEFAULT_ASSET_ID);
        assert_eq!(config.refresh_interval(), Duration::from_secs(10));
        assert_eq!(config.fetcher_config().timeout, Duration::from_secs(10));
        assert_eq!(config.settings().poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_economy_source() {
        let config = Config::try_parse_from([
            "overlay-server",
            "--source",
            "economy",
            "--default-asset-id",
            "1818",
            "--refresh-secs",
            "30",
        ])
        .unwrap();

        assert_eq!(config.source, SourceKind::Economy);
        assert_eq!(config.settings().default_asset_id.as_str(), "1818");
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));

        let source = config.build_source().unwrap();
        assert_eq!(source.name(), "Roblox Economy");
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        assert!(Config::try_parse_from(["overlay-server", "--poll-secs", "0"]).is_err());
    }
}
