//! `GET /api/analysis/complete/{symbol}` document.
//!
//! Every nested field is optional and decoding never fails: a field of the
//! wrong shape decodes to its empty value so a partially broken document
//! still renders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::lenient;
use super::number::Numeric;
use super::signal::{IndicatorValue, SignalValue};

static NO_SIGNAL: SignalValue = SignalValue::Missing;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "lenient")]
    pub symbol: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    pub current_price: Numeric,
    pub price_change_percent: Numeric,
    pub volume_24h: Numeric,
    pub quote_volume_24h: Numeric,
    #[serde(deserialize_with = "lenient")]
    pub technical_analysis: Option<TechnicalAnalysis>,
    #[serde(deserialize_with = "lenient")]
    pub lstm_prediction: Option<LstmPrediction>,
    #[serde(deserialize_with = "lenient")]
    pub sentiment_analysis: Option<SentimentAnalysis>,
    #[serde(deserialize_with = "lenient")]
    pub final_recommendation: Option<FinalRecommendation>,
    #[serde(deserialize_with = "lenient")]
    pub charts: Option<ChartBundle>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Decode a document; non-object input yields an empty result.
    pub fn from_json(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Message of a `{"error": "..."}` payload.
    pub fn backend_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// Technical overall signal, falling back to the daily timeframe's.
    pub fn technical_signal(&self) -> &SignalValue {
        let Some(technical) = &self.technical_analysis else {
            return &NO_SIGNAL;
        };
        if technical.overall_signal.is_present() {
            return &technical.overall_signal;
        }
        technical
            .daily
            .as_ref()
            .and_then(|tf| tf.signals.as_ref())
            .map(|s| &s.overall_signal)
            .unwrap_or(&NO_SIGNAL)
    }

    pub fn sentiment_signal(&self) -> &SignalValue {
        self.sentiment_analysis
            .as_ref()
            .map(|s| &s.combined_signal)
            .unwrap_or(&NO_SIGNAL)
    }

    pub fn onchain_signal(&self) -> &SignalValue {
        self.sentiment_analysis
            .as_ref()
            .and_then(|s| s.onchain_metrics.as_ref())
            .map(|m| &m.signal)
            .unwrap_or(&NO_SIGNAL)
    }

    pub fn final_signal(&self) -> &SignalValue {
        self.final_recommendation
            .as_ref()
            .map(|r| &r.signal)
            .unwrap_or(&NO_SIGNAL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1w")]
    Weekly,
    #[serde(rename = "1m")]
    Monthly,
}

impl Timeframe {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Weekly => "1w",
            Self::Monthly => "1m",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalAnalysis {
    pub overall_signal: SignalValue,
    #[serde(rename = "1d", deserialize_with = "lenient")]
    pub daily: Option<TimeframeAnalysis>,
    #[serde(rename = "1w", deserialize_with = "lenient")]
    pub weekly: Option<TimeframeAnalysis>,
    #[serde(rename = "1m", deserialize_with = "lenient")]
    pub monthly: Option<TimeframeAnalysis>,
}

impl TechnicalAnalysis {
    /// Available timeframes, shortest first.
    pub fn timeframes(&self) -> Vec<(Timeframe, &TimeframeAnalysis)> {
        [
            (Timeframe::Daily, &self.daily),
            (Timeframe::Weekly, &self.weekly),
            (Timeframe::Monthly, &self.monthly),
        ]
        .into_iter()
        .filter_map(|(tf, analysis)| analysis.as_ref().map(|a| (tf, a)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeframeAnalysis {
    #[serde(deserialize_with = "lenient")]
    pub oscillators: BTreeMap<String, IndicatorValue>,
    #[serde(deserialize_with = "lenient")]
    pub moving_averages: BTreeMap<String, IndicatorValue>,
    #[serde(deserialize_with = "lenient")]
    pub signals: Option<TimeframeSignals>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeframeSignals {
    pub overall_signal: SignalValue,
    pub summary: SignalValue,
    #[serde(deserialize_with = "lenient")]
    pub details: BTreeMap<String, SignalValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LstmPrediction {
    #[serde(deserialize_with = "lenient")]
    pub model_performance: Option<ModelPerformance>,
    #[serde(deserialize_with = "lenient")]
    pub future_predictions: Option<FuturePredictions>,
    #[serde(deserialize_with = "lenient")]
    pub model_trained: Option<bool>,
}

impl LstmPrediction {
    /// Forecast as (date, price) pairs; extra dates or prices are dropped.
    pub fn forecast(&self) -> Vec<ForecastPoint> {
        let Some(future) = &self.future_predictions else {
            return Vec::new();
        };
        future
            .dates
            .iter()
            .zip(future.predictions.iter())
            .map(|(date, price)| ForecastPoint {
                date: date.clone(),
                day: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
                price: *price,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPerformance {
    #[serde(rename = "RMSE")]
    pub rmse: Numeric,
    #[serde(rename = "MAPE")]
    pub mape: Numeric,
    #[serde(rename = "R2")]
    pub r2: Numeric,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuturePredictions {
    #[serde(deserialize_with = "lenient")]
    pub dates: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub predictions: Vec<Numeric>,
    pub current_price: Numeric,
}

/// One forecast step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: String,
    pub day: Option<NaiveDate>,
    pub price: Numeric,
}

impl ForecastPoint {
    /// Short axis label (`Jan 05`), or the raw date when it does not parse.
    pub fn label(&self) -> String {
        match self.day {
            Some(day) => day.format("%b %d").to_string(),
            None => self.date.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentAnalysis {
    pub combined_score: Numeric,
    pub combined_signal: SignalValue,
    #[serde(deserialize_with = "lenient")]
    pub sentiment: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub sentiment_analysis: Option<SentimentDetail>,
    #[serde(deserialize_with = "lenient")]
    pub onchain_metrics: Option<OnchainMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentDetail {
    #[serde(deserialize_with = "lenient")]
    pub sentiment_class: Option<String>,
    pub news_count: Numeric,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnchainMetrics {
    pub active_addresses: Numeric,
    pub transaction_count: Numeric,
    pub nvt_ratio: Numeric,
    pub mvrv: Numeric,
    pub signal: SignalValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalRecommendation {
    pub signal: SignalValue,
    pub confidence: Numeric,
    #[serde(deserialize_with = "lenient")]
    pub reasoning: Option<String>,
}

/// Pre-computed chart series shipped with the analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartBundle {
    #[serde(deserialize_with = "lenient")]
    pub price: Option<ChartData>,
    #[serde(deserialize_with = "lenient")]
    pub technical: Option<ChartData>,
    #[serde(deserialize_with = "lenient")]
    pub lstm: Option<ChartData>,
    #[serde(deserialize_with = "lenient")]
    pub signals_distribution: Option<ChartData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartData {
    #[serde(deserialize_with = "lenient")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartDataset {
    #[serde(deserialize_with = "lenient")]
    pub label: String,
    #[serde(deserialize_with = "lenient")]
    pub data: Vec<Numeric>,
}
