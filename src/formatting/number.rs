//! Number, currency, large-number and percentage-change formatting.
//!
//! Every function here is total: absent, unparseable or non-finite input
//! yields a placeholder string instead of an error.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::number::ToNumber;

/// Upper bound on fractional digits, same as `Number.prototype.toFixed`.
pub const MAX_DECIMALS: usize = 20;

const NOT_AVAILABLE: &str = "N/A";

/// What to show in place of a number that is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// `N/A`
    #[default]
    NotAvailable,
    /// Zero at the requested precision, e.g. `0.00`.
    Zero,
}

impl Placeholder {
    pub fn render(&self, decimals: usize) -> String {
        match self {
            Self::NotAvailable => NOT_AVAILABLE.to_string(),
            Self::Zero => format_fixed(0.0, decimals),
        }
    }
}

impl FromStr for Placeholder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "na" | "n/a" | "not_available" => Ok(Self::NotAvailable),
            "zero" | "0" => Ok(Self::Zero),
            other => Err(format!("unknown placeholder: {}", other)),
        }
    }
}

/// Direction of a percentage change, used as a CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeClass {
    Positive,
    Negative,
    Neutral,
}

impl ChangeClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// Format with `decimals` fixed fractional digits and thousands separators.
/// Returns `N/A` when the value is missing.
pub fn format_number(value: impl ToNumber, decimals: usize) -> String {
    format_number_or(value, decimals, Placeholder::NotAvailable)
}

pub fn format_number_or(value: impl ToNumber, decimals: usize, placeholder: Placeholder) -> String {
    match value.to_number() {
        Some(v) => format_fixed(v, decimals),
        None => placeholder.render(decimals),
    }
}

/// `$`-prefixed price. The placeholder is not prefixed.
pub fn format_currency(value: impl ToNumber, decimals: usize) -> String {
    format_currency_or(value, decimals, Placeholder::NotAvailable)
}

pub fn format_currency_or(value: impl ToNumber, decimals: usize, placeholder: Placeholder) -> String {
    match value.to_number() {
        Some(v) => format!("${}", format_fixed(v, decimals)),
        None => placeholder.render(decimals),
    }
}

/// Abbreviate with `K`/`M`/`B`/`T` suffixes; below one thousand falls back to
/// two fixed decimals.
pub fn format_large_number(value: impl ToNumber) -> String {
    format_large_number_or(value, Placeholder::NotAvailable)
}

pub fn format_large_number_or(value: impl ToNumber, placeholder: Placeholder) -> String {
    const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    let Some(v) = value.to_number() else {
        return placeholder.render(2);
    };
    SCALES
        .iter()
        .find(|(threshold, _)| v.abs() >= *threshold)
        .map(|(threshold, suffix)| format!("{:.2}{}", v / threshold, suffix))
        .unwrap_or_else(|| format_fixed(v, 2))
}

/// Signed percentage with two decimals: `+2.50%`, `-1.20%`, `+0.00%`.
pub fn format_change(percent: impl ToNumber) -> String {
    format_change_or(percent, Placeholder::NotAvailable)
}

pub fn format_change_or(percent: impl ToNumber, placeholder: Placeholder) -> String {
    match percent.to_number() {
        Some(v) => {
            let v = if v == 0.0 { 0.0 } else { v };
            let sign = if v >= 0.0 { "+" } else { "" };
            format!("{}{:.2}%", sign, v)
        }
        None => match placeholder {
            Placeholder::NotAvailable => NOT_AVAILABLE.to_string(),
            Placeholder::Zero => format!("{}%", placeholder.render(2)),
        },
    }
}

/// Colour category for a change. Exactly zero and missing values are neutral.
pub fn change_class(percent: impl ToNumber) -> ChangeClass {
    match percent.to_number() {
        Some(v) if v > 0.0 => ChangeClass::Positive,
        Some(v) if v < 0.0 => ChangeClass::Negative,
        _ => ChangeClass::Neutral,
    }
}

/// Fixed-point rendering with en-US digit grouping.
fn format_fixed(value: f64, decimals: usize) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let fixed = format!("{:.*}", decimals, value);
    let (negative, digits) = match fixed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, fixed.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (digits, None),
    };

    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if negative && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
