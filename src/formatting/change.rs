//! 24h price change of a symbol.
//!
//! Two definitions are in circulation: derived from the open/close pair, or
//! the `price_change_percent` the backend reports. Which one the dashboard
//! shows is a deployment choice, see [`ChangeSource`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::symbol::SymbolSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSource {
    /// `(close - open) / open * 100`
    Derived,
    /// `price_change_percent` as reported.
    Reported,
    /// Reported when numeric, derived otherwise.
    #[default]
    PreferReported,
}

impl FromStr for ChangeSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "derived" => Ok(Self::Derived),
            "reported" => Ok(Self::Reported),
            "prefer_reported" | "prefer-reported" => Ok(Self::PreferReported),
            other => Err(format!("unknown change source: {}", other)),
        }
    }
}

/// Percentage change; 0 when the selected inputs are unavailable.
pub fn calculate_change(summary: &SymbolSummary, source: ChangeSource) -> f64 {
    match source {
        ChangeSource::Derived => derived_change(summary).unwrap_or(0.0),
        ChangeSource::Reported => summary.price_change_percent.value().unwrap_or(0.0),
        ChangeSource::PreferReported => summary
            .price_change_percent
            .value()
            .or_else(|| derived_change(summary))
            .unwrap_or(0.0),
    }
}

fn derived_change(summary: &SymbolSummary) -> Option<f64> {
    let open = summary.open.value()?;
    let close = summary.close.value()?;
    if open == 0.0 {
        return None;
    }
    Some((close - open) / open * 100.0).filter(|v| v.is_finite())
}
