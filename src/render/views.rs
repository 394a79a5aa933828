//! Display-ready view models.
//!
//! Built purely from decoded backend data; every string here is final display
//! text and every category is final styling.

use serde::Serialize;

use crate::formatting::{
    calculate_change, change_class, format_change_or, format_currency_or, format_large_number_or,
    format_number_or, ChangeClass,
};
use crate::models::{
    AnalysisResult, IndicatorValue, LstmPrediction, Numeric, Period, SentimentAnalysis,
    SignalCategory, SignalValue, SymbolSummary, Timeframe, TimeframeAnalysis,
};
use crate::render::RenderOptions;
use crate::signals::{
    calculate_confidence, classify, classify_signal, gauge_gradient, normalize_signal,
    sentiment_tone, tally_signals, SentimentTone, SignalTally,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolRow {
    pub symbol: String,
    pub base_asset: String,
    pub price: String,
    pub change: String,
    pub change_class: ChangeClass,
    pub volume: String,
    pub trades: String,
}

impl SymbolRow {
    pub fn from_summary(summary: &SymbolSummary, options: &RenderOptions) -> Self {
        let change = calculate_change(summary, options.change_source);
        Self {
            symbol: summary.symbol.clone(),
            base_asset: summary.base_asset().to_string(),
            price: price_text(&summary.close, options),
            change: format_change_or(change, options.placeholder),
            change_class: change_class(change),
            volume: format_large_number_or(&summary.quote_volume, options.placeholder),
            trades: format_number_or(&summary.count, 0, options.placeholder),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalBadge {
    pub category: SignalCategory,
    /// Backend wording, upper-cased (`STRONG BUY`).
    pub text: String,
}

impl SignalBadge {
    pub fn from_signal(value: &SignalValue) -> Self {
        Self {
            category: classify(value),
            text: normalize_signal(value).to_uppercase(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        self.category.css_class()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub name: String,
    pub value: String,
    pub category: SignalCategory,
}

impl IndicatorRow {
    fn new(name: &str, value: &IndicatorValue, options: &RenderOptions) -> Self {
        Self {
            name: indicator_name(name),
            value: value.display(2, options.placeholder),
            category: classify_signal(value.signal()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub label: String,
    pub value: String,
}

impl MetricRow {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeframeView {
    pub timeframe: Timeframe,
    pub signal: SignalBadge,
    pub tally: SignalTally,
    pub oscillators: Vec<IndicatorRow>,
    pub moving_averages: Vec<IndicatorRow>,
}

impl TimeframeView {
    pub fn build(timeframe: Timeframe, analysis: &TimeframeAnalysis, options: &RenderOptions) -> Self {
        let signals = analysis.signals.clone().unwrap_or_default();
        let tally = match signals.summary {
            SignalValue::Tally { buy, sell, hold } => SignalTally {
                buy: count(buy),
                sell: count(sell),
                hold: count(hold),
            },
            _ => tally_signals(signals.details.values()),
        };
        let rows = |group: &std::collections::BTreeMap<String, IndicatorValue>| {
            group
                .iter()
                .map(|(name, value)| IndicatorRow::new(name, value, options))
                .collect::<Vec<_>>()
        };
        Self {
            timeframe,
            signal: SignalBadge::from_signal(&signals.overall_signal),
            tally,
            oscillators: rows(&analysis.oscillators),
            moving_averages: rows(&analysis.moving_averages),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentView {
    pub score: String,
    pub tone: SentimentTone,
    pub gauge_css: String,
    pub signal: SignalBadge,
    pub label: String,
    pub onchain: Vec<MetricRow>,
}

impl SentimentView {
    pub fn build(sentiment: &SentimentAnalysis, options: &RenderOptions) -> Self {
        let score = sentiment.combined_score;
        let label = sentiment
            .sentiment
            .clone()
            .or_else(|| {
                sentiment
                    .sentiment_analysis
                    .as_ref()
                    .and_then(|d| d.sentiment_class.clone())
            })
            .unwrap_or_else(|| "NEUTRAL".to_string());
        let onchain = sentiment
            .onchain_metrics
            .as_ref()
            .map(|m| {
                vec![
                    MetricRow::new(
                        "Active Addresses",
                        format_large_number_or(&m.active_addresses, options.placeholder),
                    ),
                    MetricRow::new(
                        "Transactions",
                        format_large_number_or(&m.transaction_count, options.placeholder),
                    ),
                    MetricRow::new("NVT Ratio", format_number_or(&m.nvt_ratio, 2, options.placeholder)),
                    MetricRow::new("MVRV", format_number_or(&m.mvrv, 3, options.placeholder)),
                ]
            })
            .unwrap_or_default();
        Self {
            score: format_number_or(&score, 2, options.placeholder),
            tone: sentiment_tone(&score),
            gauge_css: gauge_gradient(&score).to_css(),
            signal: SignalBadge::from_signal(&sentiment.combined_signal),
            label,
            onchain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub current_price: String,
    pub target_price: String,
    pub expected_change: String,
    pub expected_change_class: ChangeClass,
    pub trained: bool,
    pub metrics: Vec<MetricRow>,
    pub forecast: Vec<ForecastRow>,
}

impl PredictionView {
    pub fn build(prediction: &LstmPrediction, fallback_price: Numeric, options: &RenderOptions) -> Self {
        let points = prediction.forecast();
        let current = prediction
            .future_predictions
            .as_ref()
            .map(|f| f.current_price)
            .filter(Numeric::is_present)
            .unwrap_or(fallback_price);
        let target = points
            .last()
            .map(|p| p.price)
            .unwrap_or_default();
        let expected = match (current.value(), target.value()) {
            (Some(c), Some(t)) if c != 0.0 => Some((t - c) / c * 100.0),
            _ => None,
        };
        let metrics = prediction
            .model_performance
            .as_ref()
            .map(|m| {
                vec![
                    MetricRow::new("RMSE", format_number_or(&m.rmse, 2, options.placeholder)),
                    MetricRow::new("MAPE", format_percent(&m.mape, options)),
                    MetricRow::new("R²", format_number_or(&m.r2, 3, options.placeholder)),
                ]
            })
            .unwrap_or_default();
        Self {
            current_price: price_text(&current, options),
            target_price: price_text(&target, options),
            expected_change: format_change_or(expected, options.placeholder),
            expected_change_class: change_class(expected),
            trained: prediction.model_trained.unwrap_or(false),
            metrics,
            forecast: points
                .iter()
                .map(|p| ForecastRow {
                    date: p.label(),
                    price: price_text(&p.price, options),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub symbol: String,
    pub period: Period,
    pub price: String,
    pub change: String,
    pub change_class: ChangeClass,
    pub volume: String,
    pub recommendation: SignalBadge,
    pub confidence: u8,
    pub reported_confidence: Option<String>,
    pub reasoning: Option<String>,
    pub timeframes: Vec<TimeframeView>,
    pub sentiment: Option<SentimentView>,
    pub prediction: Option<PredictionView>,
}

impl AnalysisView {
    pub fn build(
        symbol: &str,
        period: Period,
        analysis: &AnalysisResult,
        options: &RenderOptions,
    ) -> Self {
        let recommendation = if analysis.final_signal().is_present() {
            analysis.final_signal()
        } else {
            analysis.technical_signal()
        };
        let final_recommendation = analysis.final_recommendation.as_ref();
        Self {
            symbol: analysis
                .symbol
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| symbol.to_string()),
            period,
            price: price_text(&analysis.current_price, options),
            change: format_change_or(&analysis.price_change_percent, options.placeholder),
            change_class: change_class(&analysis.price_change_percent),
            volume: format_large_number_or(&analysis.quote_volume_24h, options.placeholder),
            recommendation: SignalBadge::from_signal(recommendation),
            confidence: calculate_confidence(analysis, &options.confidence_sources),
            reported_confidence: final_recommendation
                .and_then(|r| r.confidence.value())
                .map(|c| format!("{}%", format_number_or(c, 0, options.placeholder))),
            reasoning: final_recommendation.and_then(|r| r.reasoning.clone()),
            timeframes: analysis
                .technical_analysis
                .as_ref()
                .map(|t| {
                    t.timeframes()
                        .into_iter()
                        .map(|(tf, a)| TimeframeView::build(tf, a, options))
                        .collect()
                })
                .unwrap_or_default(),
            sentiment: analysis
                .sentiment_analysis
                .as_ref()
                .map(|s| SentimentView::build(s, options)),
            prediction: analysis
                .lstm_prediction
                .as_ref()
                .map(|p| PredictionView::build(p, analysis.current_price, options)),
        }
    }
}

fn price_text(value: &Numeric, options: &RenderOptions) -> String {
    let decimals = value.value().map(price_decimals).unwrap_or(2);
    format_currency_or(value, decimals, options.placeholder)
}

/// Sub-dollar assets need more precision to be readable.
fn price_decimals(price: f64) -> usize {
    match price.abs() {
        p if p >= 1.0 => 2,
        p if p >= 0.01 => 4,
        _ => 6,
    }
}

fn format_percent(value: &Numeric, options: &RenderOptions) -> String {
    match value.value() {
        Some(v) => format!("{}%", format_number_or(v, 2, options.placeholder)),
        None => options.placeholder.render(2),
    }
}

fn count(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value.round() as usize
    } else {
        0
    }
}

/// `sma_20` -> `SMA 20`, `rsi` -> `RSI`.
fn indicator_name(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}
