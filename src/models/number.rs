//! Lenient numeric decoding.
//!
//! The backend mixes JSON numbers and numeric strings for the same field
//! (`price_change_percent` arrives as `"2.04"`), and any field may be null or
//! missing. [`Numeric`] absorbs all of that without failing the surrounding
//! document.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A number that may be absent or unparseable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Numeric(Option<f64>);

impl Numeric {
    pub const MISSING: Numeric = Numeric(None);

    pub fn new(value: f64) -> Self {
        Self(Some(value).filter(|v| v.is_finite()))
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn from_json(value: &Value) -> Self {
        Self(parse_json_number(value))
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for Numeric {
    fn from(value: Option<f64>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl Serialize for Numeric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_none(),
        }
    }
}

/// Parse a string the way the dashboard reads numeric fields: trimmed, finite.
pub fn parse_number_str(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Extract a finite number from a JSON number or numeric string.
pub fn parse_json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number_str(s),
        _ => None,
    }
}

/// Anything the formatting layer accepts as a number.
///
/// Conversions never fail; they yield `None` for absent or unparseable input.
pub trait ToNumber {
    fn to_number(&self) -> Option<f64>;
}

impl ToNumber for f64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self).filter(|v| v.is_finite())
    }
}

impl ToNumber for f32 {
    fn to_number(&self) -> Option<f64> {
        f64::from(*self).to_number()
    }
}

impl ToNumber for i32 {
    fn to_number(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl ToNumber for i64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl ToNumber for u32 {
    fn to_number(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl ToNumber for u64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl ToNumber for str {
    fn to_number(&self) -> Option<f64> {
        parse_number_str(self)
    }
}

impl ToNumber for String {
    fn to_number(&self) -> Option<f64> {
        parse_number_str(self)
    }
}

impl ToNumber for Value {
    fn to_number(&self) -> Option<f64> {
        parse_json_number(self)
    }
}

impl ToNumber for Numeric {
    fn to_number(&self) -> Option<f64> {
        self.0
    }
}

impl<T: ToNumber> ToNumber for Option<T> {
    fn to_number(&self) -> Option<f64> {
        self.as_ref().and_then(ToNumber::to_number)
    }
}

impl<T: ToNumber + ?Sized> ToNumber for &T {
    fn to_number(&self) -> Option<f64> {
        (**self).to_number()
    }
}
