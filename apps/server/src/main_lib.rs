use std::sync::Arc;

use memedex_market_data::{CoinGeckoProvider, MarketDataService, UpstreamProvider};
use memedex_wallet::{ChainInfo, WalletMode};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub market: Arc<MarketDataService>,
    pub wallet_mode: WalletMode,
    pub chain: ChainInfo,
}

pub fn init_tracing() {
    let log_format = std::env::var("MEMEDEX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = CoinGeckoProvider::with_config(
        &config.coingecko_url,
        config.coingecko_api_key.clone(),
        config.request_timeout,
    );
    tracing::info!(
        "Market data upstream: {} (api key: {})",
        provider.base_url(),
        config.coingecko_api_key.is_some()
    );
    build_state_with_provider(config, Arc::new(provider)).await
}

/// State over an arbitrary upstream provider.
pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn UpstreamProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let market = MarketDataService::new(provider, config.market_data_config());
    tracing::info!(
        "Tracking {} coins, snapshot ttl {:?}, stale policy {:?}",
        market.tracked_coins().len(),
        config.cache_ttl,
        config.stale_policy
    );

    Ok(Arc::new(AppState {
        market: Arc::new(market),
        wallet_mode: config.wallet_mode,
        chain: ChainInfo::injective_testnet(),
    }))
}
