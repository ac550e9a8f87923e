use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use memedex_wallet::{ChainInfo, WalletInfo, WalletMode, SUPPORTED_WALLETS};
use serde::Serialize;

use crate::main_lib::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WalletCatalogue {
    mode: &'static str,
    chain: ChainInfo,
    wallets: &'static [WalletInfo],
}

/// Wallets the front end may offer, with the configured adapter variant.
async fn list_wallets(State(state): State<Arc<AppState>>) -> Json<WalletCatalogue> {
    let mode = match state.wallet_mode {
        WalletMode::Extension => "extension",
        WalletMode::Simulated => "simulated",
    };
    Json(WalletCatalogue {
        mode,
        chain: state.chain.clone(),
        wallets: SUPPORTED_WALLETS,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/wallets", get(list_wallets))
}
