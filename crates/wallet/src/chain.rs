//! Chain registration payload handed to wallet extensions.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    pub coin_type: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
    pub bech32_prefix_acc_pub: String,
    pub bech32_prefix_val_addr: String,
    pub bech32_prefix_val_pub: String,
    pub bech32_prefix_cons_addr: String,
    pub bech32_prefix_cons_pub: String,
}

impl Bech32Config {
    /// Standard Cosmos prefixes derived from one account prefix.
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            bech32_prefix_acc_addr: prefix.to_string(),
            bech32_prefix_acc_pub: format!("{prefix}pub"),
            bech32_prefix_val_addr: format!("{prefix}valoper"),
            bech32_prefix_val_pub: format!("{prefix}valoperpub"),
            bech32_prefix_cons_addr: format!("{prefix}valcons"),
            bech32_prefix_cons_pub: format!("{prefix}valconspub"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceStep {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub coin_denom: String,
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_gecko_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price_step: Option<GasPriceStep>,
}

/// What an extension needs to register a chain it does not ship with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc: String,
    pub rest: String,
    pub bip44: Bip44,
    pub bech32_config: Bech32Config,
    pub currencies: Vec<Currency>,
    pub fee_currencies: Vec<Currency>,
    pub stake_currency: Currency,
    pub features: Vec<String>,
}

impl ChainInfo {
    /// Injective testnet, the chain the trading backend settles on.
    pub fn injective_testnet() -> Self {
        let inj = Currency {
            coin_denom: "INJ".to_string(),
            coin_minimal_denom: "inj".to_string(),
            coin_decimals: 18,
            coin_gecko_id: Some("injective-protocol".to_string()),
            gas_price_step: None,
        };
        let fee = Currency {
            gas_price_step: Some(GasPriceStep {
                low: 0.0001,
                average: 0.00025,
                high: 0.0004,
            }),
            ..inj.clone()
        };

        Self {
            chain_id: "injective-888".to_string(),
            chain_name: "Injective Testnet".to_string(),
            rpc: "https://testnet.sentry.tm.injective.network:443".to_string(),
            rest: "https://testnet.sentry.lcd.injective.network:443".to_string(),
            bip44: Bip44 { coin_type: 60 },
            bech32_config: Bech32Config::from_prefix("inj"),
            currencies: vec![inj.clone()],
            fee_currencies: vec![fee],
            stake_currency: inj,
            features: ["ibc-transfer", "ibc-go", "eth-address-gen", "eth-key-sign"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Account address prefix (e.g. "inj").
    pub fn address_prefix(&self) -> &str {
        &self.bech32_config.bech32_prefix_acc_addr
    }
}
