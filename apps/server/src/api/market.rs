use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use memedex_market_data::{AssetDetail, MarketOverview, MarketRecord, PriceHistory, SearchResponse};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct HistoryQuery {
    days: Option<String>,
}

impl HistoryQuery {
    /// `None` when absent or not a number; the service applies its default.
    fn days(&self) -> Option<u32> {
        self.days.as_deref().and_then(|d| d.trim().parse().ok())
    }
}

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

async fn list_memecoins(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<MarketRecord>>> {
    let snapshot = state
        .market
        .get_market_snapshot()
        .await
        .map_err(ApiError::market("Failed to fetch meme coin market data"))?;
    Ok(Json(snapshot.as_ref().clone()))
}

async fn price_history(
    State(state): State<Arc<AppState>>,
    Path(coin_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<PriceHistory>> {
    let history = state
        .market
        .get_price_history(&coin_id, query.days())
        .await
        .map_err(ApiError::market(format!(
            "Failed to fetch price history for {}",
            coin_id
        )))?;
    Ok(Json(history))
}

async fn coin_info(
    State(state): State<Arc<AppState>>,
    Path(coin_id): Path<String>,
) -> ApiResult<Json<AssetDetail>> {
    let detail = state
        .market
        .get_asset_detail(&coin_id)
        .await
        .map_err(ApiError::market(format!(
            "Failed to fetch coin info for {}",
            coin_id
        )))?;
    Ok(Json(detail))
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let results = state
        .market
        .search_assets(query.q.as_deref())
        .await
        .map_err(ApiError::market("Failed to search coins"))?;
    Ok(Json(results))
}

async fn overview(State(state): State<Arc<AppState>>) -> ApiResult<Json<MarketOverview>> {
    let overview = state
        .market
        .get_market_overview()
        .await
        .map_err(ApiError::market("Failed to fetch market overview"))?;
    Ok(Json(overview))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/memecoins", get(list_memecoins))
        .route("/history/{coin_id}", get(price_history))
        .route("/info/{coin_id}", get(coin_info))
        .route("/search", get(search))
        .route("/overview", get(overview))
}
