use serde::{Deserialize, Serialize};

use super::market::MarketRecord;

/// Number of records listed in [`MarketOverview::top_tokens`].
pub const OVERVIEW_TOP_N: usize = 10;

/// Aggregate figures over the tracked meme coins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub total_market_cap: f64,
    pub total_volume_24h: f64,
    /// Mean of the available 24h changes, 0 when none are reported
    pub average_price_change_24h: f64,
    pub top_tokens: Vec<MarketRecord>,
}

impl MarketOverview {
    /// Aggregate a snapshot. Records missing a figure are left out of that sum.
    pub fn from_records(records: &[MarketRecord]) -> Self {
        let mut top_tokens = records.to_vec();
        top_tokens.sort_by(|a, b| {
            let a = a.market_cap().unwrap_or(0.0);
            let b = b.market_cap().unwrap_or(0.0);
            b.total_cmp(&a)
        });
        top_tokens.truncate(OVERVIEW_TOP_N);

        let total_market_cap = top_tokens.iter().filter_map(MarketRecord::market_cap).sum();
        let total_volume_24h = top_tokens.iter().filter_map(MarketRecord::total_volume).sum();

        let changes: Vec<f64> = top_tokens
            .iter()
            .filter_map(MarketRecord::price_change_percentage_24h)
            .collect();
        let average_price_change_24h = if changes.is_empty() {
            0.0
        } else {
            changes.iter().sum::<f64>() / changes.len() as f64
        };

        Self {
            total_market_cap,
            total_volume_24h,
            average_price_change_24h,
            top_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_present_figures_only() {
        let records = vec![
            MarketRecord::new("pepe", 0.000001)
                .with_market_cap(100.0)
                .with_volume(10.0)
                .with_change_24h(4.0),
            MarketRecord::new("bonk", 0.00002)
                .with_market_cap(300.0)
                .with_change_24h(-2.0),
            MarketRecord::new("wojak", 0.001),
        ];

        let overview = MarketOverview::from_records(&records);
        assert_eq!(overview.total_market_cap, 400.0);
        assert_eq!(overview.total_volume_24h, 10.0);
        assert_eq!(overview.average_price_change_24h, 1.0);
        assert_eq!(overview.top_tokens[0].id(), Some("bonk"));
        assert_eq!(overview.top_tokens[1].id(), Some("pepe"));
    }

    #[test]
    fn empty_snapshot_gives_zeroes() {
        let overview = MarketOverview::from_records(&[]);
        assert_eq!(overview.total_market_cap, 0.0);
        assert_eq!(overview.average_price_change_24h, 0.0);
        assert!(overview.top_tokens.is_empty());
    }

    #[test]
    fn keeps_only_the_top_ten_by_market_cap() {
        let records: Vec<MarketRecord> = (0..15)
            .map(|i| MarketRecord::new(format!("coin-{i}"), 1.0).with_market_cap(i as f64))
            .collect();

        let overview = MarketOverview::from_records(&records);
        assert_eq!(overview.top_tokens.len(), OVERVIEW_TOP_N);
        assert_eq!(overview.top_tokens[0].id(), Some("coin-14"));
        assert_eq!(overview.total_market_cap, (5..15).sum::<i32>() as f64);
    }
}
