//! CoinGecko market data provider implementation.
//!
//! This module provides market data from the CoinGecko v3 API:
//! - Market listing via /coins/markets
//! - Price history via /coins/{id}/market_chart
//! - Coin detail via /coins/{id}
//! - Search via /search
//!
//! The public tier is rate limited per IP; a pro key raises the limit and
//! is sent as the `x-cg-pro-api-key` header when configured.
//! API documentation: https://docs.coingecko.com/reference/introduction

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{AssetDetail, MarketRecord, PriceHistory, SearchResponse};
use crate::provider::UpstreamProvider;

/// Public CoinGecko API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const PROVIDER_ID: &str = "COINGECKO";
const API_KEY_HEADER: &str = "x-cg-pro-api-key";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Quote currency for every price the proxy serves.
const VS_CURRENCY: &str = "usd";

/// Error body returned by CoinGecko
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// CoinGecko market data provider.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    /// Create a provider against the public API with no key.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_BASE_URL, None, DEFAULT_TIMEOUT)
    }

    /// Create a provider with an explicit base URL, optional pro key and request timeout.
    pub fn with_config(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, MarketDataError> {
        let invalid = |message: String| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message,
        };
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| invalid(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("Invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request to the CoinGecko API and decode the body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let endpoint = segments.join("/");
        let url = self.endpoint_url(segments)?;

        let mut request = self.client.get(url).query(params);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        debug!("CoinGecko request: /{} with {} params", endpoint, params.len());

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::NotFound { resource: endpoint });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(error_msg) = error_resp.error {
                    return Err(MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: error_msg,
                    });
                }
            }

            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })?;

        serde_json::from_str(&text).map_err(|e| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Query for the market listing of the tracked ids.
fn markets_params(ids: &[String]) -> Vec<(&'static str, String)> {
    vec![
        ("vs_currency", VS_CURRENCY.to_string()),
        ("ids", ids.join(",")),
        ("order", "market_cap_desc".to_string()),
        ("per_page", "100".to_string()),
        ("page", "1".to_string()),
        ("sparkline", "false".to_string()),
    ]
}

/// Query for the detail document with every heavy section switched off.
fn detail_params() -> Vec<(&'static str, String)> {
    [
        "localization",
        "tickers",
        "market_data",
        "community_data",
        "developer_data",
        "sparkline",
    ]
    .into_iter()
    .map(|flag| (flag, "false".to_string()))
    .collect()
}

#[async_trait]
impl UpstreamProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<MarketRecord>, MarketDataError> {
        self.fetch(&["coins", "markets"], &markets_params(ids)).await
    }

    async fn fetch_price_history(
        &self,
        asset_id: &str,
        days: u32,
    ) -> Result<PriceHistory, MarketDataError> {
        let params = [
            ("vs_currency", VS_CURRENCY.to_string()),
            ("days", days.to_string()),
        ];
        self.fetch(&["coins", asset_id, "market_chart"], &params).await
    }

    async fn fetch_asset_detail(&self, asset_id: &str) -> Result<AssetDetail, MarketDataError> {
        self.fetch(&["coins", asset_id], &detail_params()).await
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, MarketDataError> {
        self.fetch(&["search"], &[("query", query.to_string())]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = CoinGeckoProvider::new();
        assert_eq!(provider.id(), "COINGECKO");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let provider = CoinGeckoProvider::with_config(
            "https://pro-api.coingecko.com/api/v3/",
            None,
            DEFAULT_TIMEOUT,
        );
        assert_eq!(provider.base_url(), "https://pro-api.coingecko.com/api/v3");
    }

    #[test]
    fn test_asset_ids_stay_one_path_segment() {
        let provider = CoinGeckoProvider::new();
        let url = provider.endpoint_url(&["coins", "a/b", "market_chart"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.coingecko.com/api/v3/coins/a%2Fb/market_chart"
        );
    }

    #[test]
    fn test_empty_api_key_is_ignored() {
        let provider =
            CoinGeckoProvider::with_config(DEFAULT_BASE_URL, Some(String::new()), DEFAULT_TIMEOUT);
        assert!(provider.api_key.is_none());
    }

    #[test]
    fn test_markets_params_join_ids() {
        let ids = vec!["pepe".to_string(), "bonk".to_string()];
        let params = markets_params(&ids);
        assert!(params.contains(&("ids", "pepe,bonk".to_string())));
        assert!(params.contains(&("vs_currency", "usd".to_string())));
        assert!(params.contains(&("order", "market_cap_desc".to_string())));
        assert!(params.contains(&("sparkline", "false".to_string())));
    }

    #[test]
    fn test_detail_params_disable_heavy_sections() {
        let params = detail_params();
        assert_eq!(params.len(), 6);
        assert!(params.iter().all(|(_, v)| v == "false"));
        assert!(params.iter().any(|(k, _)| *k == "tickers"));
    }

    #[test]
    fn test_parse_market_chart() {
        let body = r#"{
            "prices": [[1700000000000, 0.0000011], [1700000300000, 0.0000012]],
            "market_caps": [[1700000000000, 400000000]],
            "total_volumes": [[1700000000000, 1200000]]
        }"#;
        let history: PriceHistory = serde_json::from_str(body).unwrap();
        assert_eq!(history.prices().len(), 2);
        assert_eq!(history.prices()[0].0, 1_700_000_000_000);
        assert_eq!(history.latest_price(), Some(0.0000012));
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "coins": [
                {"id": "pepe", "name": "Pepe", "symbol": "PEPE", "market_cap_rank": 30, "thumb": "t.png"}
            ],
            "exchanges": [],
            "categories": []
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.coins().len(), 1);
        assert_eq!(response.coins()[0].market_cap_rank(), Some(30));
        assert!(response.get("exchanges").is_some());
    }
}
