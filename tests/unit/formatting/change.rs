//! Unit tests for 24h change computation

use cryptovault::formatting::{calculate_change, ChangeSource};
use cryptovault::models::SymbolSummary;
use serde_json::json;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_derived_change_from_open_close() {
    let summary = SymbolSummary::new("BTCUSDT").with_prices(100.0, 110.0);
    assert!(approx(calculate_change(&summary, ChangeSource::Derived), 10.0));
}

#[test]
fn test_derived_change_without_prices_is_zero() {
    let summary = SymbolSummary::new("BTCUSDT");
    assert_eq!(calculate_change(&summary, ChangeSource::Derived), 0.0);
    let zero_open = SymbolSummary::new("BTCUSDT").with_prices(0.0, 10.0);
    assert_eq!(calculate_change(&zero_open, ChangeSource::Derived), 0.0);
}

#[test]
fn test_reported_change_ignores_prices() {
    let summary = SymbolSummary::new("BTCUSDT")
        .with_prices(100.0, 110.0)
        .with_change_percent(2.04);
    assert!(approx(calculate_change(&summary, ChangeSource::Reported), 2.04));
    let missing = SymbolSummary::new("BTCUSDT").with_prices(100.0, 110.0);
    assert_eq!(calculate_change(&missing, ChangeSource::Reported), 0.0);
}

#[test]
fn test_prefer_reported_falls_back_to_derived() {
    let reported = SymbolSummary::from_json(&json!({
        "open": 100.0, "close": 90.0, "price_change_percent": "3.5"
    }));
    assert!(approx(calculate_change(&reported, ChangeSource::PreferReported), 3.5));

    let unparseable = SymbolSummary::from_json(&json!({
        "open": 100.0, "close": 90.0, "price_change_percent": "n/a"
    }));
    assert!(approx(calculate_change(&unparseable, ChangeSource::PreferReported), -10.0));

    let nothing = SymbolSummary::from_json(&json!({}));
    assert_eq!(calculate_change(&nothing, ChangeSource::PreferReported), 0.0);
}

#[test]
fn test_change_source_parsing() {
    assert_eq!("derived".parse::<ChangeSource>(), Ok(ChangeSource::Derived));
    assert_eq!("Prefer-Reported".parse::<ChangeSource>(), Ok(ChangeSource::PreferReported));
    assert!("latest".parse::<ChangeSource>().is_err());
    assert_eq!(ChangeSource::default(), ChangeSource::PreferReported);
}
