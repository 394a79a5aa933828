//! Agreement-based confidence.
//!
//! This is a majority-agreement heuristic: the share of the selected top-level
//! signals that agree with the most common category. It is not a probability.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::analysis::AnalysisResult;
use crate::models::signal::SignalValue;
use crate::signals::aggregation::tally_signals;

/// Confidence reported when no signal is available.
pub const NEUTRAL_CONFIDENCE: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    Technical,
    Sentiment,
    OnChain,
    FinalRecommendation,
}

impl SignalSource {
    pub fn select<'a>(&self, analysis: &'a AnalysisResult) -> &'a SignalValue {
        match self {
            Self::Technical => analysis.technical_signal(),
            Self::Sentiment => analysis.sentiment_signal(),
            Self::OnChain => analysis.onchain_signal(),
            Self::FinalRecommendation => analysis.final_signal(),
        }
    }
}

impl FromStr for SignalSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technical" => Ok(Self::Technical),
            "sentiment" => Ok(Self::Sentiment),
            "onchain" | "on_chain" | "on-chain" => Ok(Self::OnChain),
            "final" | "final_recommendation" => Ok(Self::FinalRecommendation),
            other => Err(format!("unknown signal source: {}", other)),
        }
    }
}

/// Which signals take part in the agreement score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceSources(Vec<SignalSource>);

impl ConfidenceSources {
    pub fn new(sources: Vec<SignalSource>) -> Self {
        let mut unique = Vec::with_capacity(sources.len());
        for source in sources {
            if !unique.contains(&source) {
                unique.push(source);
            }
        }
        Self(unique)
    }

    pub fn sources(&self) -> &[SignalSource] {
        &self.0
    }

    /// Parse a comma separated list, e.g. `technical,sentiment,onchain`.
    pub fn parse_list(raw: &str) -> Result<Self, String> {
        let sources = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(SignalSource::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if sources.is_empty() {
            return Err("empty signal source list".to_string());
        }
        Ok(Self::new(sources))
    }
}

impl Default for ConfidenceSources {
    fn default() -> Self {
        Self(vec![SignalSource::Technical, SignalSource::Sentiment])
    }
}

/// `round(max_tally / total * 100)` over the selected signals, 50 when none is present.
pub fn calculate_confidence(analysis: &AnalysisResult, sources: &ConfidenceSources) -> u8 {
    let tally = tally_signals(sources.sources().iter().map(|s| s.select(analysis)));
    if tally.total() == 0 {
        return NEUTRAL_CONFIDENCE;
    }
    let share = tally.max() as f64 / tally.total() as f64;
    (share * 100.0).round() as u8
}
