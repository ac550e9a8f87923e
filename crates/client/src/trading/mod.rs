//! Client for the external trading backend.
//!
//! Every method is one HTTP call followed by a fixed mapping from the
//! backend's wire shape to a view model. Failures are logged and returned
//! unchanged; nothing is cached or retried.

mod models;
mod wire;

use rust_decimal::Decimal;
use serde_json::json;
use tracing::{error, info};

use crate::config::ClientConfig;
use crate::errors::Result;
use crate::http::HttpClient;

pub use models::{
    Badge, Campaign, CampaignRequirements, Direction, LeaderboardEntry, LiquidityPool, MemeToken,
    OpenPositionRequest, PerformancePoint, Position, PositionStatus, PricePoint, Reward,
    RewardType, RiskLevel, Timeframe,
};
use wire::{
    direction_param, ApiCampaign, ApiLeaderboardEntry, ApiLiquidityPool, ApiMemeToken,
    ApiPosition, ApiPricePoint, ApiReward,
};

/// HTTP client for the trading backend (`NEXT_PUBLIC_API_URL`).
///
/// # Example
///
/// ```ignore
/// let client = TradingApiClient::new("http://localhost:8000/api/v1")?;
/// let tokens = client.list_meme_tokens().await?;
/// ```
#[derive(Debug, Clone)]
pub struct TradingApiClient {
    http: HttpClient,
}

impl TradingApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(&ClientConfig {
            api_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new("TradingApi", &config.api_url, config.timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    // Tokens

    pub async fn list_meme_tokens(&self) -> Result<Vec<MemeToken>> {
        let tokens: Vec<ApiMemeToken> = self
            .http
            .get(&["meme-tokens"], &[])
            .await
            .inspect_err(|e| error!("Error fetching meme tokens: {}", e))?;
        Ok(tokens.into_iter().map(MemeToken::from).collect())
    }

    pub async fn get_meme_token(&self, token_id: &str) -> Result<MemeToken> {
        let token: ApiMemeToken = self
            .http
            .get(&["meme-tokens", token_id], &[])
            .await
            .inspect_err(|e| error!("Error fetching meme token {}: {}", token_id, e))?;
        Ok(token.into())
    }

    /// Price history for `token_id`. The backend picks the window when
    /// `days` is `None`.
    pub async fn get_price_history(
        &self,
        token_id: &str,
        days: Option<u32>,
    ) -> Result<Vec<PricePoint>> {
        let query: Vec<(&str, String)> = days.map(|d| ("days", d.to_string())).into_iter().collect();

        let points: Vec<ApiPricePoint> = self
            .http
            .get(&["meme-tokens", token_id, "price-history"], &query)
            .await
            .inspect_err(|e| error!("Error fetching price history: {}", e))?;
        points
            .into_iter()
            .map(PricePoint::try_from)
            .collect::<Result<Vec<_>>>()
            .inspect_err(|e| error!("Error fetching price history: {}", e))
    }

    // Trading

    pub async fn get_positions(&self, user_id: &str) -> Result<Vec<Position>> {
        let positions: Vec<ApiPosition> = self
            .http
            .get(&["trading", "positions", user_id], &[])
            .await
            .inspect_err(|e| error!("Error fetching positions: {}", e))?;
        Ok(positions.into_iter().map(Position::from).collect())
    }

    /// Open a position. The backend takes its arguments as query parameters.
    pub async fn open_position(&self, request: &OpenPositionRequest) -> Result<Position> {
        let query = [
            ("user_id", request.user_id.clone()),
            ("token", request.token_id.clone()),
            ("amount", request.amount.to_string()),
            ("direction", direction_param(request.direction).to_string()),
            ("duration", request.timeframe.to_string()),
        ];

        let position: ApiPosition = self
            .http
            .post::<(), _>(&["trading", "position", "open"], &query, None)
            .await
            .inspect_err(|e| error!("Error opening position: {}", e))?;

        let position = Position::from(position);
        info!(
            "[TradingApi] Opened position {} on {}",
            position.id, request.token_id
        );
        Ok(position)
    }

    pub async fn close_position(&self, position_id: &str) -> Result<Position> {
        let position: ApiPosition = self
            .http
            .post::<(), _>(&["trading", "position", position_id, "close"], &[], None)
            .await
            .inspect_err(|e| error!("Error closing position {}: {}", position_id, e))?;
        Ok(position.into())
    }

    // Liquidity

    pub async fn list_pools(&self) -> Result<Vec<LiquidityPool>> {
        let pools: Vec<ApiLiquidityPool> = self
            .http
            .get(&["liquidity", "pools"], &[])
            .await
            .inspect_err(|e| error!("Error fetching pools: {}", e))?;
        Ok(pools.into_iter().map(LiquidityPool::from).collect())
    }

    pub async fn add_liquidity(&self, pool_id: &str, amount: Decimal) -> Result<()> {
        self.http
            .post_unit(&["liquidity", "pools", pool_id, "add"], Some(&json!({ "amount": amount })))
            .await
            .inspect_err(|e| error!("Error adding liquidity: {}", e))
    }

    pub async fn remove_liquidity(&self, pool_id: &str, amount: Decimal) -> Result<()> {
        self.http
            .post_unit(&["liquidity", "pools", pool_id, "remove"], Some(&json!({ "amount": amount })))
            .await
            .inspect_err(|e| error!("Error removing liquidity: {}", e))
    }

    // Community

    pub async fn leaderboard(&self, timeframe: Timeframe) -> Result<Vec<LeaderboardEntry>> {
        let entries: Vec<ApiLeaderboardEntry> = self
            .http
            .get(&["leaderboard", timeframe.as_str()], &[])
            .await
            .inspect_err(|e| error!("Error fetching leaderboard: {}", e))?;
        Ok(entries.into_iter().map(LeaderboardEntry::from).collect())
    }

    pub async fn rewards(&self) -> Result<Vec<Reward>> {
        let rewards: Vec<ApiReward> = self
            .http
            .get(&["rewards"], &[])
            .await
            .inspect_err(|e| error!("Error fetching rewards: {}", e))?;
        Ok(rewards.into_iter().map(Reward::from).collect())
    }

    pub async fn claim_reward(&self, reward_id: &str) -> Result<()> {
        self.http
            .post_unit::<()>(&["rewards", reward_id, "claim"], None)
            .await
            .inspect_err(|e| error!("Error claiming reward: {}", e))
    }

    pub async fn campaigns(&self) -> Result<Vec<Campaign>> {
        let campaigns: Vec<ApiCampaign> = self
            .http
            .get(&["campaigns"], &[])
            .await
            .inspect_err(|e| error!("Error fetching campaigns: {}", e))?;
        Ok(campaigns.into_iter().map(Campaign::from).collect())
    }
}
