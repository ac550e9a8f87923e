//! Market data service: the cached listing plus pass-through lookups.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::cache::{MarketSnapshot, SnapshotCache, StalePolicy};
use crate::errors::MarketDataError;
use crate::models::{AssetDetail, MarketOverview, PriceHistory, SearchResponse};
use crate::provider::UpstreamProvider;

/// Meme coins tracked by default, by upstream id.
pub const DEFAULT_TRACKED_COINS: &[&str] = &[
    "pepe",
    "dogecoin",
    "shiba-inu",
    "floki",
    "bonk",
    "wojak",
    "memecoin",
    "dogelon-mars",
    "catecoin",
    "hoge-finance",
];

/// History range used when the caller does not supply one.
pub const DEFAULT_HISTORY_DAYS: u32 = 1;

/// Settings for [`MarketDataService`].
#[derive(Clone, Debug)]
pub struct MarketDataConfig {
    /// Maximum age of a snapshot that is still served from cache.
    pub freshness_window: Duration,
    /// Behaviour when a refresh fails.
    pub stale_policy: StalePolicy,
    /// Upstream ids requested for the market listing.
    pub tracked_coins: Vec<String>,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            freshness_window: Duration::from_secs(60),
            stale_policy: StalePolicy::FailHard,
            tracked_coins: DEFAULT_TRACKED_COINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Front door for all market data reads.
///
/// Only the market listing is cached. History, detail and search go straight
/// to the provider on every call.
pub struct MarketDataService {
    provider: Arc<dyn UpstreamProvider>,
    cache: SnapshotCache,
    stale_policy: StalePolicy,
    tracked_coins: Vec<String>,
}

impl MarketDataService {
    pub fn new(provider: Arc<dyn UpstreamProvider>, config: MarketDataConfig) -> Self {
        Self {
            provider,
            cache: SnapshotCache::new(config.freshness_window),
            stale_policy: config.stale_policy,
            tracked_coins: config.tracked_coins,
        }
    }

    /// The tracked upstream ids.
    pub fn tracked_coins(&self) -> &[String] {
        &self.tracked_coins
    }

    /// The underlying cache, for diagnostics.
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Market listing for the tracked coins.
    ///
    /// Served from cache while the snapshot is non-empty and inside the
    /// freshness window; otherwise fetched once and cached wholesale.
    pub async fn get_market_snapshot(&self) -> Result<MarketSnapshot, MarketDataError> {
        if let Some(snapshot) = self.cache.fresh().await {
            return Ok(snapshot);
        }

        match self.provider.fetch_markets(&self.tracked_coins).await {
            Ok(records) => {
                info!(
                    provider = self.provider.id(),
                    records = records.len(),
                    "Refreshed market snapshot"
                );
                Ok(self.cache.replace(records).await)
            }
            Err(err) => {
                error!("Error fetching meme coin market data: {}", err);
                if self.stale_policy == StalePolicy::ServeStale {
                    if let Some(stale) = self.cache.last_known().await {
                        warn!("Serving stale market snapshot after refresh failure");
                        return Ok(stale);
                    }
                }
                Err(err)
            }
        }
    }

    /// Price history for one asset; `days` defaults to [`DEFAULT_HISTORY_DAYS`].
    pub async fn get_price_history(
        &self,
        asset_id: &str,
        days: Option<u32>,
    ) -> Result<PriceHistory, MarketDataError> {
        let days = days.unwrap_or(DEFAULT_HISTORY_DAYS);
        self.provider
            .fetch_price_history(asset_id, days)
            .await
            .inspect_err(|e| error!("Error fetching price history for {}: {}", asset_id, e))
    }

    /// Detail document for one asset.
    pub async fn get_asset_detail(&self, asset_id: &str) -> Result<AssetDetail, MarketDataError> {
        self.provider
            .fetch_asset_detail(asset_id)
            .await
            .inspect_err(|e| error!("Error fetching coin info for {}: {}", asset_id, e))
    }

    /// Search assets.
    ///
    /// A missing or empty query fails with [`MarketDataError::MissingQuery`]
    /// before the provider is contacted. Any other query is forwarded as given.
    pub async fn search_assets(
        &self,
        query: Option<&str>,
    ) -> Result<SearchResponse, MarketDataError> {
        let query = query
            .filter(|q| !q.is_empty())
            .ok_or(MarketDataError::MissingQuery)?;

        self.provider
            .search(query)
            .await
            .inspect_err(|e| error!("Error searching coins: {}", e))
    }

    /// Aggregates over the cached listing.
    pub async fn get_market_overview(&self) -> Result<MarketOverview, MarketDataError> {
        let snapshot = self.get_market_snapshot().await?;
        Ok(MarketOverview::from_records(&snapshot))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{MarketRecord, SearchResult};

    /// Provider that replays scripted listings and counts calls.
    #[derive(Default)]
    struct ScriptedProvider {
        listings: Mutex<Vec<Result<Vec<MarketRecord>, MarketDataError>>>,
        market_calls: AtomicUsize,
        search_calls: AtomicUsize,
        history_days: Mutex<Vec<u32>>,
    }

    impl ScriptedProvider {
        fn with_listings(listings: Vec<Result<Vec<MarketRecord>, MarketDataError>>) -> Self {
            Self {
                listings: Mutex::new(listings),
                ..Default::default()
            }
        }

        fn market_calls(&self) -> usize {
            self.market_calls.load(Ordering::SeqCst)
        }

        fn search_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }
    }

    fn upstream_down() -> MarketDataError {
        MarketDataError::ProviderError {
            provider: "SCRIPTED".to_string(),
            message: "HTTP 503".to_string(),
        }
    }

    #[async_trait]
    impl UpstreamProvider for ScriptedProvider {
        fn id(&self) -> &'static str {
            "SCRIPTED"
        }

        async fn fetch_markets(
            &self,
            _ids: &[String],
        ) -> Result<Vec<MarketRecord>, MarketDataError> {
            self.market_calls.fetch_add(1, Ordering::SeqCst);
            let mut listings = self.listings.lock().unwrap();
            if listings.is_empty() {
                return Err(upstream_down());
            }
            listings.remove(0)
        }

        async fn fetch_price_history(
            &self,
            asset_id: &str,
            days: u32,
        ) -> Result<PriceHistory, MarketDataError> {
            self.history_days.lock().unwrap().push(days);
            if asset_id == "unknown" {
                return Err(MarketDataError::NotFound {
                    resource: format!("coins/{}/market_chart", asset_id),
                });
            }
            Ok(PriceHistory::from_prices(vec![(1_700_000_000_000, 0.000001)]))
        }

        async fn fetch_asset_detail(
            &self,
            asset_id: &str,
        ) -> Result<AssetDetail, MarketDataError> {
            Err(MarketDataError::NotFound {
                resource: format!("coins/{}", asset_id),
            })
        }

        async fn search(&self, query: &str) -> Result<SearchResponse, MarketDataError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(SearchResponse::from_coins(vec![SearchResult::new(
                query, "Pepe", "PEPE",
            )]))
        }
    }

    fn pepe() -> Vec<MarketRecord> {
        vec![MarketRecord::new("pepe", 0.000001)]
    }

    fn service(provider: Arc<ScriptedProvider>, stale_policy: StalePolicy) -> MarketDataService {
        MarketDataService::new(
            provider,
            MarketDataConfig {
                stale_policy,
                ..Default::default()
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_reads_inside_window_hit_upstream_once() {
        let provider = Arc::new(ScriptedProvider::with_listings(vec![Ok(pepe())]));
        let service = service(provider.clone(), StalePolicy::FailHard);

        let first = service.get_market_snapshot().await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        let second = service.get_market_snapshot().await.unwrap();

        assert_eq!(provider.market_calls(), 1);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id(), Some("pepe"));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_after_window_refetches() {
        let provider = Arc::new(ScriptedProvider::with_listings(vec![
            Ok(pepe()),
            Ok(vec![MarketRecord::new("bonk", 0.00002)]),
        ]));
        let service = service(provider.clone(), StalePolicy::FailHard);

        service.get_market_snapshot().await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
        let refreshed = service.get_market_snapshot().await.unwrap();

        assert_eq!(provider.market_calls(), 2);
        assert_eq!(refreshed[0].id(), Some("bonk"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_listing_is_refetched_on_next_read() {
        let provider = Arc::new(ScriptedProvider::with_listings(vec![
            Ok(Vec::new()),
            Ok(pepe()),
        ]));
        let service = service(provider.clone(), StalePolicy::FailHard);

        assert!(service.get_market_snapshot().await.unwrap().is_empty());
        assert_eq!(service.get_market_snapshot().await.unwrap().len(), 1);
        assert_eq!(provider.market_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_hard_does_not_serve_stale() {
        let provider = Arc::new(ScriptedProvider::with_listings(vec![
            Ok(pepe()),
            Err(upstream_down()),
        ]));
        let service = service(provider.clone(), StalePolicy::FailHard);

        service.get_market_snapshot().await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;

        let err = service.get_market_snapshot().await.unwrap_err();
        assert!(matches!(err, MarketDataError::ProviderError { .. }));
        assert_eq!(provider.market_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_serve_stale_returns_previous_snapshot() {
        let provider = Arc::new(ScriptedProvider::with_listings(vec![
            Ok(pepe()),
            Err(upstream_down()),
        ]));
        let service = service(provider.clone(), StalePolicy::ServeStale);

        let first = service.get_market_snapshot().await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
        let stale = service.get_market_snapshot().await.unwrap();

        assert!(Arc::ptr_eq(&first, &stale));
    }

    #[tokio::test(start_paused = true)]
    async fn test_serve_stale_without_history_still_fails() {
        let provider = Arc::new(ScriptedProvider::default());
        let service = service(provider, StalePolicy::ServeStale);

        assert!(service.get_market_snapshot().await.is_err());
    }

    #[tokio::test]
    async fn test_missing_or_empty_query_never_reaches_upstream() {
        let provider = Arc::new(ScriptedProvider::default());
        let service = service(provider.clone(), StalePolicy::FailHard);

        for query in [None, Some("")] {
            let err = service.search_assets(query).await.unwrap_err();
            assert!(matches!(err, MarketDataError::MissingQuery));
            assert!(err.is_client_error());
        }
        assert_eq!(provider.search_calls(), 0);

        let hits = service.search_assets(Some("pepe")).await.unwrap();
        assert_eq!(hits.coins()[0].id(), Some("pepe"));
        assert_eq!(provider.search_calls(), 1);

        let hits = service.search_assets(Some(" pepe")).await.unwrap();
        assert_eq!(hits.coins()[0].id(), Some(" pepe"));
        assert_eq!(provider.search_calls(), 2);
    }

    #[tokio::test]
    async fn test_history_defaults_to_one_day() {
        let provider = Arc::new(ScriptedProvider::default());
        let service = service(provider.clone(), StalePolicy::FailHard);

        service.get_price_history("pepe", None).await.unwrap();
        service.get_price_history("pepe", Some(30)).await.unwrap();

        assert_eq!(*provider.history_days.lock().unwrap(), vec![1, 30]);
    }

    #[tokio::test]
    async fn test_unknown_asset_surfaces_as_upstream_failure() {
        let provider = Arc::new(ScriptedProvider::default());
        let service = service(provider, StalePolicy::FailHard);

        let err = service.get_price_history("unknown", None).await.unwrap_err();
        assert!(!err.is_client_error());

        let err = service.get_asset_detail("unknown").await.unwrap_err();
        assert!(matches!(err, MarketDataError::NotFound { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overview_reuses_cached_snapshot() {
        let provider = Arc::new(ScriptedProvider::with_listings(vec![Ok(vec![
            MarketRecord::new("pepe", 0.000001)
                .with_market_cap(10.0)
                .with_change_24h(2.0),
            MarketRecord::new("bonk", 0.00002)
                .with_market_cap(30.0)
                .with_change_24h(4.0),
        ])]));
        let service = service(provider.clone(), StalePolicy::FailHard);

        service.get_market_snapshot().await.unwrap();
        let overview = service.get_market_overview().await.unwrap();

        assert_eq!(provider.market_calls(), 1);
        assert_eq!(overview.total_market_cap, 40.0);
        assert_eq!(overview.average_price_change_24h, 3.0);
        assert_eq!(overview.top_tokens[0].id(), Some("bonk"));
    }
}
