//! Unit tests for signal normalization and classification

use cryptovault::models::{SignalCategory, SignalValue};
use cryptovault::signals::{classify, classify_signal, normalize_signal, tally_signals};
use serde_json::json;

fn decode(value: serde_json::Value) -> SignalValue {
    SignalValue::from_json(&value)
}

#[test]
fn test_normalize_signal_text_is_unchanged() {
    assert_eq!(normalize_signal(&SignalValue::text("STRONG BUY")), "STRONG BUY");
    assert_eq!(normalize_signal(&SignalValue::text("weak sell")), "weak sell");
}

#[test]
fn test_normalize_signal_falsy_is_hold() {
    assert_eq!(normalize_signal(&SignalValue::Missing), "HOLD");
    assert_eq!(normalize_signal(&decode(json!(""))), "HOLD");
    assert_eq!(normalize_signal(&decode(json!(0))), "HOLD");
    assert_eq!(normalize_signal(&decode(json!(false))), "HOLD");
}

#[test]
fn test_normalize_signal_labeled_objects() {
    assert_eq!(normalize_signal(&decode(json!({"signal": "SELL"}))), "SELL");
    assert_eq!(normalize_signal(&decode(json!({"overall_signal": "BUY"}))), "BUY");
    assert_eq!(
        normalize_signal(&decode(json!({"signal": "SELL", "overall_signal": "BUY"}))),
        "SELL"
    );
}

#[test]
fn test_normalize_signal_tally_uses_majority() {
    assert_eq!(normalize_signal(&decode(json!({"buy": 3, "sell": 1, "hold": 2}))), "BUY");
    assert_eq!(normalize_signal(&decode(json!({"buy": 0, "sell": 4, "hold": 1}))), "SELL");
    assert_eq!(normalize_signal(&decode(json!({"buy": 2, "sell": 2, "hold": 0}))), "HOLD");
}

#[test]
fn test_normalize_signal_unrecognized_is_hold() {
    assert_eq!(normalize_signal(&decode(json!({"note": "to the moon"}))), "HOLD");
    assert_eq!(normalize_signal(&decode(json!(["BUY"]))), "HOLD");
}

#[test]
fn test_classify_signal_substrings() {
    assert_eq!(classify_signal("STRONG BUY"), SignalCategory::Buy);
    assert_eq!(classify_signal("weak sell"), SignalCategory::Sell);
    assert_eq!(classify_signal("Buy"), SignalCategory::Buy);
    assert_eq!(classify_signal("NEUTRAL"), SignalCategory::Hold);
    assert_eq!(classify_signal(""), SignalCategory::Hold);
    assert_eq!(classify_signal(None::<&str>), SignalCategory::Hold);
}

#[test]
fn test_classify_signal_prefers_buy_when_both_appear() {
    assert_eq!(classify_signal("buy the sell-off"), SignalCategory::Buy);
}

#[test]
fn test_classify_covers_every_shape() {
    let shapes = [
        json!(null),
        json!("STRONG SELL"),
        json!({"signal": "buy"}),
        json!({"buy": 1, "sell": 5, "hold": 0}),
        json!(42),
        json!(true),
        json!([]),
        json!({}),
    ];
    for shape in shapes {
        let category = classify(&decode(shape));
        assert!(SignalCategory::ALL.contains(&category));
    }
    assert_eq!(classify(&decode(json!({"signal": "buy"}))), SignalCategory::Buy);
    assert_eq!(classify(&decode(json!({}))), SignalCategory::Hold);
}

#[test]
fn test_tally_skips_absent_signals() {
    let signals = vec![
        SignalValue::text("BUY"),
        SignalValue::text("strong buy"),
        SignalValue::text("SELL"),
        SignalValue::text(""),
        SignalValue::Missing,
    ];
    let tally = tally_signals(&signals);
    assert_eq!((tally.buy, tally.sell, tally.hold), (2, 1, 0));
    assert_eq!(tally.total(), 3);
    assert_eq!(tally.leader(), SignalCategory::Buy);
}
