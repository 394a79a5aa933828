//! Unit tests for view models and markup

use cryptovault::formatting::{ChangeClass, ChangeSource, Placeholder};
use cryptovault::models::{AnalysisResult, Period, SignalCategory, SymbolSummary};
use cryptovault::render::{
    render_analysis, render_symbol_list, AnalysisView, RenderOptions, RenderStyle, SymbolRow,
};
use cryptovault::signals::SentimentTone;
use serde_json::json;

use crate::fixtures;

fn fixture_rows(options: &RenderOptions) -> Vec<SymbolRow> {
    fixtures::symbols_payload()
        .as_array()
        .expect("array payload")
        .iter()
        .map(|s| SymbolRow::from_summary(&SymbolSummary::from_json(s), options))
        .collect()
}

fn fixture_view(options: &RenderOptions) -> AnalysisView {
    let analysis = AnalysisResult::from_json(&fixtures::analysis_payload());
    AnalysisView::build("BTCUSDT", Period::NinetyDays, &analysis, options)
}

#[test]
fn test_symbol_rows() {
    let rows = fixture_rows(&RenderOptions::default());

    assert_eq!(rows[0].symbol, "BTCUSDT");
    assert_eq!(rows[0].price, "$50,000.00");
    assert_eq!(rows[0].change, "+2.04%");
    assert_eq!(rows[0].change_class, ChangeClass::Positive);
    assert_eq!(rows[0].volume, "50.00M");
    assert_eq!(rows[0].trades, "50,000");

    // No reported change: derived from open/close.
    assert_eq!(rows[1].change, "-3.33%");
    assert_eq!(rows[1].change_class, ChangeClass::Negative);

    assert_eq!(rows[2].price, "$0.6000");
    assert_eq!(rows[2].change, "-1.50%");
    assert_eq!(rows[2].volume, "30.00K");
    assert_eq!(rows[2].trades, "40,000");
}

#[test]
fn test_symbol_rows_with_derived_change() {
    let options = RenderOptions {
        change_source: ChangeSource::Derived,
        ..Default::default()
    };
    let rows = fixture_rows(&options);
    assert_eq!(rows[0].change, "+2.04%");
    assert_eq!(rows[2].change, "+3.45%");
}

#[test]
fn test_symbol_row_placeholders() {
    let empty = SymbolSummary::new("NEWUSDT");
    let row = SymbolRow::from_summary(&empty, &RenderOptions::default());
    assert_eq!(row.price, "N/A");
    assert_eq!(row.change, "+0.00%");
    assert_eq!(row.change_class, ChangeClass::Neutral);
    assert_eq!(row.volume, "N/A");

    let zero = RenderOptions {
        placeholder: Placeholder::Zero,
        ..Default::default()
    };
    let row = SymbolRow::from_summary(&empty, &zero);
    assert_eq!(row.price, "0.00");
    assert_eq!(row.volume, "0.00");
    assert_eq!(row.trades, "0");
}

#[test]
fn test_analysis_view_headline() {
    let view = fixture_view(&RenderOptions::default());
    assert_eq!(view.symbol, "BTCUSDT");
    assert_eq!(view.price, "$50,000.00");
    assert_eq!(view.change, "+2.04%");
    assert_eq!(view.volume, "50.00M");
    assert_eq!(view.recommendation.category, SignalCategory::Buy);
    assert_eq!(view.recommendation.text, "BUY");
    assert_eq!(view.confidence, 100);
    assert_eq!(view.reported_confidence.as_deref(), Some("80%"));
    assert!(view.reasoning.is_some());
}

#[test]
fn test_analysis_view_timeframes() {
    let view = fixture_view(&RenderOptions::default());
    assert_eq!(view.timeframes.len(), 3);

    let daily = &view.timeframes[0];
    assert_eq!((daily.tally.buy, daily.tally.sell, daily.tally.hold), (2, 1, 0));
    let names: Vec<&str> = daily.oscillators.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["MACD", "RSI", "STOCH"]);
    assert_eq!(daily.oscillators[1].value, "28.40 (BUY)");
    assert_eq!(daily.oscillators[1].category, SignalCategory::Buy);
    assert_eq!(daily.oscillators[2].value, "K: 81.20 / D: 77.90 (SELL)");
    assert_eq!(daily.moving_averages[0].name, "SMA 20");

    let weekly = &view.timeframes[1];
    assert_eq!(weekly.signal.category, SignalCategory::Hold);
}

#[test]
fn test_analysis_view_sentiment_and_prediction() {
    let view = fixture_view(&RenderOptions::default());

    let sentiment = view.sentiment.as_ref().expect("sentiment");
    assert_eq!(sentiment.score, "0.72");
    assert_eq!(sentiment.tone, SentimentTone::Positive);
    assert_eq!(sentiment.label, "BULLISH");
    assert_eq!(sentiment.onchain[0].value, "416.00");
    assert_eq!(sentiment.onchain[1].value, "50.00K");
    assert_eq!(sentiment.onchain[3].value, "1.042");

    let prediction = view.prediction.as_ref().expect("prediction");
    assert_eq!(prediction.current_price, "$50,000.00");
    assert_eq!(prediction.target_price, "$51,000.00");
    assert_eq!(prediction.expected_change, "+2.00%");
    assert!(prediction.trained);
    assert_eq!(prediction.metrics[1].value, "1.62%");
    assert_eq!(prediction.forecast[0].date, "Mar 02");
}

#[test]
fn test_analysis_view_of_empty_document() {
    let view = AnalysisView::build(
        "FOOUSDT",
        Period::SevenDays,
        &AnalysisResult::default(),
        &RenderOptions::default(),
    );
    assert_eq!(view.symbol, "FOOUSDT");
    assert_eq!(view.price, "N/A");
    assert_eq!(view.change, "N/A");
    assert_eq!(view.recommendation.category, SignalCategory::Hold);
    assert_eq!(view.recommendation.text, "HOLD");
    assert_eq!(view.confidence, 50);
    assert!(view.timeframes.is_empty());
    assert!(view.sentiment.is_none());
    assert!(view.prediction.is_none());
}

#[test]
fn test_recommendation_falls_back_to_technical() {
    let analysis = AnalysisResult::from_json(&json!({
        "technical_analysis": {"overall_signal": "strong sell"}
    }));
    let view = AnalysisView::build("X", Period::default(), &analysis, &RenderOptions::default());
    assert_eq!(view.recommendation.category, SignalCategory::Sell);
    assert_eq!(view.recommendation.text, "STRONG SELL");
}

#[test]
fn test_render_styles_differ_in_detail() {
    let view = fixture_view(&RenderOptions::default());

    let compact = render_analysis(&view, RenderStyle::Compact);
    let standard = render_analysis(&view, RenderStyle::Standard);
    let detailed = render_analysis(&view, RenderStyle::Detailed);

    assert!(!compact.contains("Oscillators"));
    assert!(!compact.contains("On-chain Metrics"));
    assert_eq!(standard.matches("Oscillators").count(), 1);
    assert_eq!(detailed.matches("Oscillators").count(), 3);
    assert!(detailed.contains("class=\"reasoning\""));
    assert!(!standard.contains("class=\"reasoning\""));
    for html in [&compact, &standard, &detailed] {
        assert!(html.contains(r#"<canvas id="price-chart"></canvas>"#));
        assert!(html.contains(r#"class="badge buy""#));
    }
}

#[test]
fn test_render_symbol_list() {
    let rows = fixture_rows(&RenderOptions::default());
    let html = render_symbol_list(&rows, RenderStyle::Standard);
    assert!(html.contains(r#"<a href="/analysis/BTCUSDT">BTCUSDT</a>"#));
    assert!(html.contains(r#"<td class="negative">-3.33%</td>"#));
    assert!(html.contains("<th>Trades</th>"));
    assert!(!render_symbol_list(&rows, RenderStyle::Compact).contains("<th>Trades</th>"));
    assert!(render_symbol_list(&[], RenderStyle::Standard).contains("No symbols available"));
}

#[test]
fn test_links_percent_encode_symbol() {
    let row = SymbolRow::from_summary(&SymbolSummary::new("BTC/USD#1?x"), &RenderOptions::default());
    let html = render_symbol_list(&[row], RenderStyle::Standard);
    assert!(html.contains(r#"<a href="/analysis/BTC%2FUSD%231%3Fx">BTC/USD#1?x</a>"#));

    let view = AnalysisView::build(
        "BTC/USD",
        Period::SevenDays,
        &AnalysisResult::default(),
        &RenderOptions::default(),
    );
    let html = render_analysis(&view, RenderStyle::Standard);
    assert!(html.contains(r#"<a href="/analysis/BTC%2FUSD?period=30d">30d</a>"#));
    assert!(!html.contains("/analysis/BTC/USD"));
}
