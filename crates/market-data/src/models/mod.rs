//! Market data models
//!
//! This module contains the data types exchanged with the upstream provider:
//! - `types` - Upstream series point alias (PricePoint)
//! - `market` - One row of the market listing (MarketRecord)
//! - `history` - Price/market-cap/volume series (PriceHistory)
//! - `detail` - Per-asset detail document (AssetDetail)
//! - `search` - Search hits (SearchResponse, SearchResult)
//! - `overview` - Aggregates computed from a snapshot (MarketOverview)

mod detail;
mod history;
mod market;
mod overview;
mod search;
mod types;

pub use detail::AssetDetail;
pub use history::PriceHistory;
pub use market::MarketRecord;
pub use overview::{MarketOverview, OVERVIEW_TOP_N};
pub use search::{SearchResponse, SearchResult};
pub use types::PricePoint;
