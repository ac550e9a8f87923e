use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use memedex_market_data::{
    AssetDetail, MarketDataError, MarketRecord, PriceHistory, SearchResponse, SearchResult,
    UpstreamProvider,
};
use memedex_server::{api::app_router, build_state_with_provider, config::Config};
use serde_json::Value;
use tower::ServiceExt;

/// In-memory upstream that counts calls and can be switched to failing.
#[derive(Default)]
pub struct CountingProvider {
    pub market_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub history_days: Mutex<Vec<u32>>,
    pub failing: AtomicBool,
    pub latency: Mutex<Option<Duration>>,
}

impl CountingProvider {
    pub fn market_calls(&self) -> usize {
        self.market_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Make every market listing call take `latency` and then time out.
    pub fn time_out_after(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    fn check(&self) -> Result<(), MarketDataError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MarketDataError::ProviderError {
                provider: "COUNTING".to_string(),
                message: "HTTP 503 Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UpstreamProvider for CountingProvider {
    fn id(&self) -> &'static str {
        "COUNTING"
    }

    async fn fetch_markets(&self, _ids: &[String]) -> Result<Vec<MarketRecord>, MarketDataError> {
        self.market_calls.fetch_add(1, Ordering::SeqCst);
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
            return Err(MarketDataError::Timeout {
                provider: "COUNTING".to_string(),
            });
        }
        self.check()?;
        Ok(vec![
            MarketRecord::new("pepe", 0.000001)
                .with_market_cap(400_000_000.0)
                .with_volume(90_000_000.0)
                .with_change_24h(4.0),
            MarketRecord::new("bonk", 0.00002)
                .with_market_cap(1_500_000_000.0)
                .with_volume(200_000_000.0)
                .with_change_24h(-2.0),
        ])
    }

    async fn fetch_price_history(
        &self,
        _asset_id: &str,
        days: u32,
    ) -> Result<PriceHistory, MarketDataError> {
        self.check()?;
        self.history_days.lock().unwrap().push(days);
        Ok(PriceHistory::from_prices(vec![
            (1_714_564_800_000, 0.0000011),
            (1_714_568_400_000, 0.0000012),
        ]))
    }

    async fn fetch_asset_detail(&self, asset_id: &str) -> Result<AssetDetail, MarketDataError> {
        self.check()?;
        if asset_id != "pepe" {
            return Err(MarketDataError::NotFound {
                resource: asset_id.to_string(),
            });
        }
        Ok(serde_json::from_value(serde_json::json!({
            "id": "pepe",
            "symbol": "pepe",
            "name": "Pepe",
            "description": {"en": "The most memeable memecoin."}
        }))
        .unwrap())
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, MarketDataError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(SearchResponse::from_coins(vec![
            SearchResult::new(query, "Pepe", "PEPE").with_rank(30),
        ]))
    }
}

pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

pub async fn app_with(provider: Arc<CountingProvider>, config: &Config) -> Router {
    let state = build_state_with_provider(config, provider).await.unwrap();
    app_router(state, config)
}

/// GET `uri` and return status plus body (JSON when it parses, string otherwise).
pub async fn get(app: &Router, uri: &str) -> (u16, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}
