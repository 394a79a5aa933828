//! Sentiment gauge colours.

use serde::Serialize;

use crate::models::number::ToNumber;

pub const POSITIVE_THRESHOLD: f64 = 0.6;
pub const NEGATIVE_THRESHOLD: f64 = 0.4;

const TRACK_COLOR: &str = "#e9ecef";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentTone {
    Positive,
    Neutral,
    Negative,
}

impl SentimentTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Positive => "#27ae60",
            Self::Neutral => "#f39c12",
            Self::Negative => "#e74c3c",
        }
    }
}

/// Strictly above 0.6 is positive, strictly below 0.4 negative, the rest
/// (boundaries and unparseable scores included) neutral.
pub fn sentiment_tone(score: impl ToNumber) -> SentimentTone {
    match score.to_number() {
        Some(s) if s > POSITIVE_THRESHOLD => SentimentTone::Positive,
        Some(s) if s < NEGATIVE_THRESHOLD => SentimentTone::Negative,
        _ => SentimentTone::Neutral,
    }
}

/// Two-stop conic gradient filled proportionally to the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeGradient {
    pub tone: SentimentTone,
    pub degrees: f64,
}

impl GaugeGradient {
    pub fn to_css(&self) -> String {
        format!(
            "conic-gradient({color} 0deg {deg:.1}deg, {track} {deg:.1}deg 360deg)",
            color = self.tone.color(),
            track = TRACK_COLOR,
            deg = self.degrees,
        )
    }
}

pub fn gauge_gradient(score: impl ToNumber) -> GaugeGradient {
    let value = score.to_number();
    GaugeGradient {
        tone: sentiment_tone(value),
        degrees: value.map(|s| s.clamp(0.0, 1.0) * 360.0).unwrap_or(0.0),
    }
}
