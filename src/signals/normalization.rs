//! Collapse any backend signal shape into BUY / SELL / HOLD.

use crate::models::signal::{SignalCategory, SignalValue};

const HOLD: &str = "HOLD";

/// Text form of a signal as the backend meant it.
///
/// Falsy values become `HOLD`, strings pass through untouched (their casing is
/// interpreted by [`classify_signal`]), labeled objects prefer `signal` over
/// `overall_signal`, and tallies resolve by majority.
pub fn normalize_signal(value: &SignalValue) -> String {
    if value.is_falsy() {
        return HOLD.to_string();
    }
    match value {
        SignalValue::Text { text } => text.clone(),
        SignalValue::Labeled {
            signal,
            overall_signal,
        } => signal
            .as_ref()
            .or(overall_signal.as_ref())
            .cloned()
            .unwrap_or_else(|| HOLD.to_string()),
        SignalValue::Tally { buy, sell, hold } => {
            majority(*buy, *sell, *hold).label().to_string()
        }
        SignalValue::Number { value } => value.to_string(),
        SignalValue::Flag { value } => value.to_string(),
        SignalValue::Missing | SignalValue::Unrecognized => HOLD.to_string(),
    }
}

/// Substring classification. `buy` is checked before `sell`, so compound
/// labels like `STRONG BUY` match and a text containing both is a BUY.
pub fn classify_signal<'a>(text: impl Into<Option<&'a str>>) -> SignalCategory {
    let Some(text) = text.into() else {
        return SignalCategory::Hold;
    };
    let lowered = text.to_lowercase();
    if lowered.contains("buy") {
        SignalCategory::Buy
    } else if lowered.contains("sell") {
        SignalCategory::Sell
    } else {
        SignalCategory::Hold
    }
}

/// Normalize then classify.
pub fn classify(value: &SignalValue) -> SignalCategory {
    classify_signal(normalize_signal(value).as_str())
}

/// Majority rule for a buy/sell/hold tally; ties go to HOLD.
pub fn majority(buy: f64, sell: f64, hold: f64) -> SignalCategory {
    if buy > sell && buy >= hold {
        SignalCategory::Buy
    } else if sell > buy && sell >= hold {
        SignalCategory::Sell
    } else {
        SignalCategory::Hold
    }
}
