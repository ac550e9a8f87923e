use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use memedex_market_data::provider::coingecko::DEFAULT_BASE_URL;
use memedex_market_data::{MarketDataConfig, StalePolicy, DEFAULT_TRACKED_COINS};
use memedex_wallet::WalletMode;

/// Headroom of the route-level timeout over the upstream request timeout.
const ROUTE_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

pub struct Config {
    pub listen_addr: SocketAddr,
    pub coingecko_url: String,
    pub coingecko_api_key: Option<String>,
    /// Freshness window of the market snapshot.
    pub cache_ttl: Duration,
    pub stale_policy: StalePolicy,
    pub tracked_coins: Vec<String>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub wallet_mode: WalletMode,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = var("MEMEDEX_LISTEN_ADDR", "0.0.0.0:3001")
            .parse()
            .context("Invalid MEMEDEX_LISTEN_ADDR")?;
        let coingecko_url = var("COINGECKO_API_URL", DEFAULT_BASE_URL);
        let coingecko_api_key = lookup("COINGECKO_API_KEY").filter(|k| !k.trim().is_empty());
        let ttl_secs: u64 = var("MEMEDEX_CACHE_TTL_SECS", "60")
            .trim()
            .parse()
            .context("Invalid MEMEDEX_CACHE_TTL_SECS")?;
        let stale_policy: StalePolicy = var("MEMEDEX_STALE_ON_ERROR", "fail")
            .parse()
            .map_err(anyhow::Error::msg)
            .context("Invalid MEMEDEX_STALE_ON_ERROR")?;
        let tracked_coins = split_list(&var(
            "MEMEDEX_TRACKED_COINS",
            &DEFAULT_TRACKED_COINS.join(","),
        ));
        let cors_allow = split_list(&var("MEMEDEX_CORS_ALLOW_ORIGINS", "*"));
        let timeout_ms: u64 = var("MEMEDEX_REQUEST_TIMEOUT_MS", "30000")
            .trim()
            .parse()
            .context("Invalid MEMEDEX_REQUEST_TIMEOUT_MS")?;
        let wallet_mode: WalletMode = var("MEMEDEX_WALLET_MODE", "extension")
            .parse()
            .map_err(anyhow::Error::msg)
            .context("Invalid MEMEDEX_WALLET_MODE")?;

        Ok(Self {
            listen_addr,
            coingecko_url,
            coingecko_api_key,
            cache_ttl: Duration::from_secs(ttl_secs),
            stale_policy,
            tracked_coins,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            wallet_mode,
        })
    }

    /// Budget for a whole request through the router. Always longer than the
    /// upstream timeout.
    pub fn route_timeout(&self) -> Duration {
        self.request_timeout + ROUTE_TIMEOUT_MARGIN
    }

    pub fn market_data_config(&self) -> MarketDataConfig {
        MarketDataConfig {
            freshness_window: self.cache_ttl,
            stale_policy: self.stale_policy,
            tracked_coins: self.tracked_coins.clone(),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
