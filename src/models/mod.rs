//! Typed views of the analysis backend's JSON documents.

pub mod analysis;
pub mod number;
pub mod period;
pub mod signal;
pub mod symbol;

pub use analysis::{
    AnalysisResult, ChartBundle, ChartData, ChartDataset, FinalRecommendation, ForecastPoint,
    FuturePredictions, LstmPrediction, ModelPerformance, OnchainMetrics, SentimentAnalysis,
    SentimentDetail, TechnicalAnalysis, Timeframe, TimeframeAnalysis, TimeframeSignals,
};
pub use number::{Numeric, ToNumber};
pub use period::Period;
pub use signal::{IndicatorValue, SignalCategory, SignalValue};
pub use symbol::SymbolSummary;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a field, substituting its default when the JSON has the wrong shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
