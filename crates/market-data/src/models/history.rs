use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::PricePoint;

/// Upstream `/coins/{id}/market_chart` response, kept as the raw JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceHistory(Map<String, Value>);

impl PriceHistory {
    /// A history holding only a `prices` series.
    pub fn from_prices(prices: Vec<PricePoint>) -> Self {
        let series = prices
            .into_iter()
            .map(|(ts, price)| Value::Array(vec![ts.into(), price.into()]))
            .collect();
        let mut map = Map::new();
        map.insert("prices".to_string(), Value::Array(series));
        Self(map)
    }

    /// `[timestamp_ms, price]` pairs, oldest first. Malformed points are skipped.
    pub fn prices(&self) -> Vec<PricePoint> {
        self.series("prices")
    }

    pub fn market_caps(&self) -> Vec<PricePoint> {
        self.series("market_caps")
    }

    pub fn total_volumes(&self) -> Vec<PricePoint> {
        self.series("total_volumes")
    }

    /// Most recent price, if any.
    pub fn latest_price(&self) -> Option<f64> {
        self.prices().last().map(|(_, price)| *price)
    }

    fn series(&self, key: &str) -> Vec<PricePoint> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|points| points.iter().filter_map(point).collect())
            .unwrap_or_default()
    }
}

fn point(value: &Value) -> Option<PricePoint> {
    let pair = value.as_array()?;
    let ts = pair.first()?;
    let ts = ts.as_i64().or_else(|| ts.as_f64().map(|t| t as i64))?;
    let price = pair.get(1)?.as_f64()?;
    Some((ts, price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn series_are_read_leniently_and_served_unchanged() {
        let raw = json!({
            "prices": [[1700000000000i64, 0.0000011], [1700000300000i64, null], "junk"],
            "market_caps": [[1700000000000i64, 400000000]],
            "total_volumes": []
        });
        let history: PriceHistory = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(history.prices(), vec![(1_700_000_000_000, 0.0000011)]);
        assert_eq!(history.market_caps(), vec![(1_700_000_000_000, 400000000.0)]);
        assert!(history.total_volumes().is_empty());
        assert_eq!(serde_json::to_value(&history).unwrap(), raw);
    }

    #[test]
    fn from_prices_builds_a_prices_series() {
        let history = PriceHistory::from_prices(vec![(1, 0.5), (2, 0.75)]);
        assert_eq!(history.latest_price(), Some(0.75));
        assert_eq!(
            serde_json::to_value(&history).unwrap(),
            json!({"prices": [[1, 0.5], [2, 0.75]]})
        );
    }
}
