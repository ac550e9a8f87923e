//! Upstream provider trait definition.
//!
//! This module defines the `UpstreamProvider` trait that the market data
//! service calls for every outbound request.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{AssetDetail, MarketRecord, PriceHistory, SearchResponse};

/// Trait for upstream market data providers.
///
/// One call on this trait is one outbound HTTP request. Implementations
/// must not cache or retry; the service above decides what is cached.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use memedex_market_data::provider::UpstreamProvider;
///
/// struct FixedProvider(Vec<MarketRecord>);
///
/// #[async_trait]
/// impl UpstreamProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_markets(&self, _ids: &[String]) -> Result<Vec<MarketRecord>, MarketDataError> {
///         Ok(self.0.clone())
///     }
///
///     // ... implement the remaining methods
/// }
/// ```
#[async_trait]
pub trait UpstreamProvider: Send + Sync {
    /// Unique identifier for this provider (e.g. "COINGECKO").
    ///
    /// Used in log lines and error messages.
    fn id(&self) -> &'static str;

    /// Fetch the market listing for the given asset ids, ordered by market cap.
    async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<MarketRecord>, MarketDataError>;

    /// Fetch the price history of one asset over the last `days` days.
    async fn fetch_price_history(
        &self,
        asset_id: &str,
        days: u32,
    ) -> Result<PriceHistory, MarketDataError>;

    /// Fetch the detail document of one asset.
    async fn fetch_asset_detail(&self, asset_id: &str) -> Result<AssetDetail, MarketDataError>;

    /// Search assets by free-text query.
    ///
    /// The query is assumed non-empty; validation happens in the service.
    async fn search(&self, query: &str) -> Result<SearchResponse, MarketDataError>;
}
