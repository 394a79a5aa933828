//! Polymorphic signal and indicator shapes.
//!
//! The backend is not consistent about how it encodes a recommendation: a
//! plain `"BUY"`, an object carrying `signal` or `overall_signal`, or a tally
//! of `buy`/`sell`/`hold` counts. These are decoded once into tagged unions so
//! the rest of the crate never sniffs JSON shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::formatting::{format_number_or, Placeholder};
use crate::models::number::{parse_json_number, Numeric};

/// Categorical trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalCategory {
    Buy,
    Sell,
    Hold,
}

impl SignalCategory {
    pub const ALL: [SignalCategory; 3] = [Self::Buy, Self::Sell, Self::Hold];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        }
    }

    /// CSS class used by the markup layer.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Hold => "hold",
        }
    }
}

impl Default for SignalCategory {
    fn default() -> Self {
        Self::Hold
    }
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// A signal as the backend sent it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalValue {
    #[default]
    Missing,
    Text {
        text: String,
    },
    Labeled {
        signal: Option<String>,
        overall_signal: Option<String>,
    },
    Tally {
        buy: f64,
        sell: f64,
        hold: f64,
    },
    Number {
        value: f64,
    },
    Flag {
        value: bool,
    },
    Unrecognized,
}

impl SignalValue {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(s) => Self::Text { text: s.clone() },
            Value::Bool(b) => Self::Flag { value: *b },
            Value::Number(n) => n
                .as_f64()
                .map(|value| Self::Number { value })
                .unwrap_or(Self::Unrecognized),
            Value::Object(map) => Self::from_object(map),
            Value::Array(_) => Self::Unrecognized,
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let signal = map.get("signal").and_then(Value::as_str).map(str::to_string);
        let overall_signal = map
            .get("overall_signal")
            .and_then(Value::as_str)
            .map(str::to_string);
        if signal.is_some() || overall_signal.is_some() {
            return Self::Labeled {
                signal,
                overall_signal,
            };
        }

        let count = |key: &str| map.get(key).and_then(parse_json_number);
        match (count("buy"), count("sell"), count("hold")) {
            (None, None, None) => Self::Unrecognized,
            (buy, sell, hold) => Self::Tally {
                buy: buy.unwrap_or(0.0),
                sell: sell.unwrap_or(0.0),
                hold: hold.unwrap_or(0.0),
            },
        }
    }

    /// JavaScript-style falsiness: what the dashboard treats as "no signal".
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text { text } => text.is_empty(),
            Self::Number { value } => *value == 0.0 || value.is_nan(),
            Self::Flag { value } => !value,
            Self::Labeled { .. } | Self::Tally { .. } | Self::Unrecognized => false,
        }
    }

    pub fn is_present(&self) -> bool {
        !self.is_falsy()
    }
}

impl From<&str> for SignalValue {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl<'de> Deserialize<'de> for SignalValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// An indicator reading in any of the shapes the backend produces.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorValue {
    #[default]
    Missing,
    Number {
        value: f64,
    },
    Text {
        text: String,
    },
    Reading {
        value: Numeric,
        signal: Option<String>,
    },
    Stochastic {
        k: Numeric,
        d: Numeric,
        signal: Option<String>,
    },
    Unrecognized,
}

impl IndicatorValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Number(n) => n
                .as_f64()
                .map(|value| Self::Number { value })
                .unwrap_or(Self::Unrecognized),
            Value::String(s) => Self::Text { text: s.clone() },
            Value::Object(map) => {
                let signal = map.get("signal").and_then(Value::as_str).map(str::to_string);
                if map.contains_key("k") || map.contains_key("d") {
                    Self::Stochastic {
                        k: map.get("k").map(Numeric::from_json).unwrap_or_default(),
                        d: map.get("d").map(Numeric::from_json).unwrap_or_default(),
                        signal,
                    }
                } else if map.contains_key("value") || signal.is_some() {
                    Self::Reading {
                        value: map.get("value").map(Numeric::from_json).unwrap_or_default(),
                        signal,
                    }
                } else {
                    Self::Unrecognized
                }
            }
            Value::Bool(_) | Value::Array(_) => Self::Unrecognized,
        }
    }

    pub fn signal(&self) -> Option<&str> {
        match self {
            Self::Reading { signal, .. } | Self::Stochastic { signal, .. } => signal.as_deref(),
            _ => None,
        }
    }

    /// Render the reading as text. Never fails, whatever the shape.
    pub fn display(&self, decimals: usize, placeholder: Placeholder) -> String {
        let num = |n: &Numeric| format_number_or(n, decimals, placeholder);
        let with_signal = |body: String, signal: &Option<String>| match signal {
            Some(s) if !s.is_empty() => format!("{} ({})", body, s),
            _ => body,
        };
        match self {
            Self::Number { value } => format_number_or(*value, decimals, placeholder),
            Self::Text { text } => match crate::models::number::parse_number_str(text) {
                Some(v) => format_number_or(v, decimals, placeholder),
                None if text.is_empty() => placeholder.render(decimals),
                None => text.clone(),
            },
            Self::Reading { value, signal } => with_signal(num(value), signal),
            Self::Stochastic { k, d, signal } => {
                with_signal(format!("K: {} / D: {}", num(k), num(d)), signal)
            }
            Self::Missing | Self::Unrecognized => placeholder.render(decimals),
        }
    }
}

impl<'de> Deserialize<'de> for IndicatorValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}
