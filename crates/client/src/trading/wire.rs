//! Response shapes of the trading backend (snake_case, backend enums) and
//! their mapping to view models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ClientError;

use super::models::{
    Badge, Campaign, CampaignRequirements, Direction, LeaderboardEntry, LiquidityPool, MemeToken,
    PerformancePoint, Position, PositionStatus, PricePoint, Reward, RewardType, RiskLevel,
};

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMemeToken {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: Option<String>,
    current_price: Decimal,
    #[serde(default)]
    market_cap: Option<Decimal>,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    #[serde(default)]
    price_change_24h: Option<f64>,
    #[serde(default)]
    volume_24h: Option<Decimal>,
}

impl From<ApiMemeToken> for MemeToken {
    fn from(t: ApiMemeToken) -> Self {
        Self {
            id: t.id,
            symbol: t.symbol.to_uppercase(),
            name: t.name,
            image: t.image.filter(|i| !i.is_empty()),
            price: t.current_price,
            price_change_24h: t.price_change_24h.unwrap_or_default(),
            volume_24h: t.volume_24h.unwrap_or_default(),
            market_cap: t.market_cap.unwrap_or_default(),
            market_cap_rank: t.market_cap_rank,
        }
    }
}

/// Millisecond timestamp and price.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiPricePoint {
    timestamp: i64,
    price: Decimal,
}

impl TryFrom<ApiPricePoint> for PricePoint {
    type Error = ClientError;

    fn try_from(p: ApiPricePoint) -> Result<Self, Self::Error> {
        let timestamp = DateTime::from_timestamp_millis(p.timestamp).ok_or_else(|| {
            ClientError::Decode(format!("Timestamp out of range: {}", p.timestamp))
        })?;
        Ok(Self {
            timestamp,
            price: p.price,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiDirection {
    Long,
    Short,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum ApiPositionStatus {
    Open,
    Closed,
    Liquidated,
    Cancelled,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiPosition {
    id: String,
    token: String,
    direction: ApiDirection,
    amount: Decimal,
    duration: u32,
    status: ApiPositionStatus,
    #[serde(default)]
    entry_price: Option<Decimal>,
    #[serde(default)]
    realized_pnl: Option<Decimal>,
    #[serde(default)]
    pnl: Option<Decimal>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    closed_at: Option<DateTime<Utc>>,
}

impl From<ApiPosition> for Position {
    fn from(p: ApiPosition) -> Self {
        Self {
            id: p.id,
            token_id: p.token,
            direction: match p.direction {
                ApiDirection::Long => Direction::Up,
                ApiDirection::Short => Direction::Down,
            },
            amount: p.amount,
            timeframe: p.duration,
            status: match p.status {
                ApiPositionStatus::Open => PositionStatus::Active,
                ApiPositionStatus::Closed | ApiPositionStatus::Liquidated => {
                    PositionStatus::Completed
                }
                ApiPositionStatus::Cancelled => PositionStatus::Cancelled,
            },
            entry_price: p.entry_price,
            // Closed positions report the settled figure.
            pnl: p.realized_pnl.or(p.pnl),
            created_at: p.created_at,
            closed_at: p.closed_at,
        }
    }
}

pub(crate) fn direction_param(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "long",
        Direction::Down => "short",
    }
}

#[derive(Debug, Deserialize)]
struct ApiPerformancePoint {
    date: String,
    value: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiRiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiLiquidityPool {
    id: String,
    name: String,
    total_liquidity: Decimal,
    apr: f64,
    #[serde(default)]
    user_liquidity: Option<Decimal>,
    risk_level: ApiRiskLevel,
    #[serde(default)]
    performance_history: Vec<ApiPerformancePoint>,
}

impl From<ApiLiquidityPool> for LiquidityPool {
    fn from(p: ApiLiquidityPool) -> Self {
        Self {
            id: p.id,
            name: p.name,
            total_liquidity: p.total_liquidity,
            apr: p.apr,
            user_liquidity: p.user_liquidity,
            risk_level: match p.risk_level {
                ApiRiskLevel::Low => RiskLevel::Low,
                ApiRiskLevel::Medium => RiskLevel::Medium,
                ApiRiskLevel::High => RiskLevel::High,
            },
            performance_history: p
                .performance_history
                .into_iter()
                .map(|h| PerformancePoint {
                    date: h.date,
                    value: h.value,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiBadge {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    unlocked_at: Option<DateTime<Utc>>,
}

impl From<ApiBadge> for Badge {
    fn from(b: ApiBadge) -> Self {
        Self {
            id: b.id,
            name: b.name,
            description: b.description.unwrap_or_default(),
            image: b.image.unwrap_or_default(),
            unlocked_at: b.unlocked_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiLeaderboardEntry {
    rank: u32,
    address: String,
    points: u64,
    #[serde(default)]
    trades: u64,
    #[serde(default)]
    win_rate: f64,
    #[serde(default)]
    badges: Vec<ApiBadge>,
}

impl From<ApiLeaderboardEntry> for LeaderboardEntry {
    fn from(e: ApiLeaderboardEntry) -> Self {
        Self {
            rank: e.rank,
            address: e.address,
            points: e.points,
            trades: e.trades,
            win_rate: e.win_rate,
            badges: e.badges.into_iter().map(Badge::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum ApiRewardType {
    Nft,
    Discount,
    Boost,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiReward {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    points_cost: u64,
    #[serde(rename = "type")]
    reward_type: ApiRewardType,
    value: Decimal,
}

impl From<ApiReward> for Reward {
    fn from(r: ApiReward) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description.unwrap_or_default(),
            image: r.image.unwrap_or_default(),
            points_cost: r.points_cost,
            reward_type: match r.reward_type {
                ApiRewardType::Nft => RewardType::Nft,
                ApiRewardType::Discount => RewardType::Discount,
                ApiRewardType::Boost => RewardType::Boost,
            },
            value: r.value,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ApiCampaignRequirements {
    #[serde(default)]
    min_trades: Option<u64>,
    #[serde(default)]
    min_volume: Option<Decimal>,
    #[serde(default)]
    min_win_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCampaign {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    #[serde(default)]
    rewards: Vec<ApiReward>,
    #[serde(default)]
    requirements: ApiCampaignRequirements,
}

impl From<ApiCampaign> for Campaign {
    fn from(c: ApiCampaign) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description.unwrap_or_default(),
            start_date: c.start_date,
            end_date: c.end_date,
            rewards: c.rewards.into_iter().map(Reward::from).collect(),
            requirements: CampaignRequirements {
                trades: c.requirements.min_trades,
                volume: c.requirements.min_volume,
                win_rate: c.requirements.min_win_rate,
            },
        }
    }
}
