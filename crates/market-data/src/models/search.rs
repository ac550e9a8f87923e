//! Search result models for coin lookup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream `/search` response, kept as the raw JSON object.
///
/// Only `coins` is read; exchanges, categories and NFTs are served as sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResponse(Map<String, Value>);

impl SearchResponse {
    /// A response holding only coin hits.
    pub fn from_coins(coins: Vec<SearchResult>) -> Self {
        let coins = coins.into_iter().map(|c| Value::Object(c.0)).collect();
        let mut map = Map::new();
        map.insert("coins".to_string(), Value::Array(coins));
        Self(map)
    }

    /// Coin hits. Entries that are not JSON objects are skipped.
    pub fn coins(&self) -> Vec<SearchResult> {
        self.0
            .get("coins")
            .and_then(Value::as_array)
            .map(|coins| {
                coins
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|c| SearchResult(c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Any other section of the response, as sent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// A single coin hit from a search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResult(Map<String, Value>);

impl SearchResult {
    /// Create a hit with id, name and ticker.
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(id.into()));
        map.insert("name".to_string(), Value::String(name.into()));
        map.insert("symbol".to_string(), Value::String(symbol.into()));
        Self(map)
    }

    /// Set the market cap rank.
    pub fn with_rank(mut self, rank: u32) -> Self {
        self.0.insert("market_cap_rank".to_string(), rank.into());
        self
    }

    /// Upstream asset id (e.g. "pepe")
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Display name (e.g. "Pepe")
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Ticker (e.g. "PEPE")
    pub fn symbol(&self) -> Option<&str> {
        self.0.get("symbol").and_then(Value::as_str)
    }

    pub fn market_cap_rank(&self) -> Option<u64> {
        self.0.get("market_cap_rank").and_then(Value::as_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builders_produce_the_upstream_shape() {
        let response =
            SearchResponse::from_coins(vec![SearchResult::new("pepe", "Pepe", "PEPE").with_rank(30)]);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "coins": [{"id": "pepe", "name": "Pepe", "symbol": "PEPE", "market_cap_rank": 30}]
            })
        );
    }

    #[test]
    fn unranked_hits_keep_their_null_rank() {
        let raw = json!({
            "coins": [{"id": "wojak", "name": "Wojak", "symbol": "WOJAK", "market_cap_rank": null}],
            "nfts": []
        });
        let response: SearchResponse = serde_json::from_value(raw.clone()).unwrap();

        let coins = response.coins();
        assert_eq!(coins[0].symbol(), Some("WOJAK"));
        assert_eq!(coins[0].market_cap_rank(), None);
        assert_eq!(serde_json::to_value(&response).unwrap(), raw);
    }
}
