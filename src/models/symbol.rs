use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use super::number::Numeric;

/// One row of `GET /api/symbols`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolSummary {
    #[serde(deserialize_with = "lenient")]
    pub symbol: String,
    pub open: Numeric,
    pub close: Numeric,
    pub high: Numeric,
    pub low: Numeric,
    pub volume: Numeric,
    pub quote_volume: Numeric,
    pub count: Numeric,
    pub price_change_percent: Numeric,
}

impl SymbolSummary {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn with_prices(mut self, open: f64, close: f64) -> Self {
        self.open = Numeric::new(open);
        self.close = Numeric::new(close);
        self
    }

    pub fn with_change_percent(mut self, percent: f64) -> Self {
        self.price_change_percent = Numeric::new(percent);
        self
    }

    pub fn with_volume(mut self, quote_volume: f64, count: f64) -> Self {
        self.quote_volume = Numeric::new(quote_volume);
        self.count = Numeric::new(count);
        self
    }

    /// Decode a single record; anything that is not an object becomes an empty summary.
    pub fn from_json(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Base asset of a quote-suffixed pair, `BTCUSDT` -> `BTC`.
    pub fn base_asset(&self) -> &str {
        ["USDT", "USDC", "BUSD", "USD"]
            .iter()
            .find_map(|quote| {
                self.symbol
                    .strip_suffix(quote)
                    .filter(|base| !base.is_empty())
            })
            .unwrap_or(self.symbol.as_str())
    }
}
