use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the upstream `/coins/markets` listing.
///
/// Owned by the upstream provider and kept as the raw JSON object: the same
/// keys and values are served back. The accessors read the few figures the
/// market overview needs and return `None` for absent or non-numeric values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketRecord(Map<String, Value>);

impl MarketRecord {
    /// Create a record with only an id and a price.
    pub fn new(id: impl Into<String>, current_price: f64) -> Self {
        Self::default()
            .with("id", Value::String(id.into()))
            .with("current_price", current_price.into())
    }

    /// Set the market capitalisation.
    pub fn with_market_cap(self, market_cap: f64) -> Self {
        self.with("market_cap", market_cap.into())
    }

    /// Set the 24h volume.
    pub fn with_volume(self, volume: f64) -> Self {
        self.with("total_volume", volume.into())
    }

    /// Set the 24h percentage change.
    pub fn with_change_24h(self, change: f64) -> Self {
        self.with("price_change_percentage_24h", change.into())
    }

    fn with(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    /// Upstream asset id (e.g. "pepe")
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Current price in the quote currency (USD)
    pub fn current_price(&self) -> Option<f64> {
        self.number("current_price")
    }

    pub fn market_cap(&self) -> Option<f64> {
        self.number("market_cap")
    }

    /// 24h traded volume
    pub fn total_volume(&self) -> Option<f64> {
        self.number("total_volume")
    }

    /// 24h price change in percent
    pub fn price_change_percentage_24h(&self) -> Option<f64> {
        self.number("price_change_percentage_24h")
    }

    /// Any upstream field, as sent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }
}
