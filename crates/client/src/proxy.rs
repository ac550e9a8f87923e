//! Typed client for the market proxy's own routes.

use memedex_market_data::{AssetDetail, MarketOverview, MarketRecord, PriceHistory, SearchResponse};
use tracing::error;

use crate::config::ClientConfig;
use crate::errors::{ClientError, Result};
use crate::http::HttpClient;

/// HTTP client for the market proxy (`MEMEDEX_PROXY_URL`).
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: HttpClient,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(&ClientConfig {
            proxy_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new("MarketProxy", &config.proxy_url, config.timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Market records of the tracked meme coins.
    pub async fn memecoins(&self) -> Result<Vec<MarketRecord>> {
        self.http
            .get(&["memecoins"], &[])
            .await
            .inspect_err(|e| error!("Error fetching meme coins: {}", e))
    }

    pub async fn price_history(&self, coin_id: &str, days: Option<u32>) -> Result<PriceHistory> {
        let query: Vec<(&str, String)> = days.map(|d| ("days", d.to_string())).into_iter().collect();
        self.http
            .get(&["history", coin_id], &query)
            .await
            .inspect_err(|e| error!("Error fetching price history for {}: {}", coin_id, e))
    }

    pub async fn coin_info(&self, coin_id: &str) -> Result<AssetDetail> {
        self.http
            .get(&["info", coin_id], &[])
            .await
            .inspect_err(|e| error!("Error fetching coin info for {}: {}", coin_id, e))
    }

    /// Search coins. An empty query fails locally without a request; any
    /// other query is sent as given.
    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        if query.is_empty() {
            return Err(ClientError::MissingQuery);
        }
        self.http
            .get(&["search"], &[("q", query.to_string())])
            .await
            .inspect_err(|e| error!("Error searching coins: {}", e))
    }

    pub async fn overview(&self) -> Result<MarketOverview> {
        self.http
            .get(&["overview"], &[])
            .await
            .inspect_err(|e| error!("Error fetching market overview: {}", e))
    }
}
