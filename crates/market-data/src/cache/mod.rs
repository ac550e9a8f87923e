//! In-memory snapshot cache for the market listing.

mod snapshot;

pub use snapshot::{CachedMarketSnapshot, MarketSnapshot, SnapshotCache, StalePolicy};
