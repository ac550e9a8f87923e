//! Memedex Market Data Crate
//!
//! This crate is the core of the market data proxy: it fronts an upstream
//! price API (CoinGecko) with a short-lived in-memory snapshot so repeated
//! reads of the meme coin listing do not exhaust the upstream rate limit.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +--------------------+
//! |   HTTP handlers  | --> | MarketDataService  |
//! +------------------+     +--------------------+
//!                            |               |
//!                            v               v
//!                  +---------------+   +------------------+
//!                  | SnapshotCache |   | UpstreamProvider |  (CoinGecko, test doubles)
//!                  +---------------+   +------------------+
//! ```
//!
//! Only the market listing goes through the cache. History, detail and
//! search are direct pass-throughs. There is no retry and no request
//! coalescing; concurrent misses each hit the upstream.
//!
//! # Core Types
//!
//! - [`MarketDataService`] - Entry point used by request handlers
//! - [`SnapshotCache`] - Single-entry TTL cache for the market listing
//! - [`MarketRecord`] - One upstream market row, passed through verbatim
//! - [`PriceHistory`], [`AssetDetail`], [`SearchResponse`] - Pass-through documents
//! - [`MarketOverview`] - Aggregates computed from a snapshot

pub mod cache;
pub mod errors;
pub mod models;
pub mod provider;
pub mod service;

// Re-export all public types from models
pub use models::{
    AssetDetail, MarketOverview, MarketRecord, PriceHistory, PricePoint, SearchResponse,
    SearchResult,
};

pub use cache::{CachedMarketSnapshot, MarketSnapshot, SnapshotCache, StalePolicy};
pub use errors::{ErrorKind, MarketDataError};
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::UpstreamProvider;
pub use service::{MarketDataConfig, MarketDataService, DEFAULT_HISTORY_DAYS, DEFAULT_TRACKED_COINS};
