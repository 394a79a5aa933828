//! Unit tests for screen transitions

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cryptovault::dashboard::{Dashboard, Screen, ScreenData};
use cryptovault::models::{AnalysisResult, Period, SymbolSummary};
use cryptovault::render::{RecordingSurface, RenderOptions};
use cryptovault::services::{ApiError, MarketApi, StaticMarketApi};
use serde_json::json;

use crate::fixtures;

fn static_api() -> Arc<dyn MarketApi> {
    let symbols = fixtures::symbols_payload()
        .as_array()
        .expect("array payload")
        .iter()
        .map(SymbolSummary::from_json)
        .collect();
    let api = StaticMarketApi::new(symbols)
        .with_analysis("BTCUSDT", AnalysisResult::from_json(&fixtures::analysis_payload()))
        .with_analysis(
            "BADUSDT",
            AnalysisResult::from_json(&json!({"error": "Insufficient data for BADUSDT"})),
        );
    Arc::new(api)
}

fn dashboard(api: Arc<dyn MarketApi>) -> Dashboard<RecordingSurface> {
    Dashboard::new(api, RecordingSurface::new(), RenderOptions::default())
}

/// Fails until `recover` is called.
struct FlakyApi {
    healthy: AtomicBool,
    inner: Arc<dyn MarketApi>,
}

impl FlakyApi {
    fn recover(&self) {
        self.healthy.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MarketApi for FlakyApi {
    async fn symbols(&self) -> Result<Vec<SymbolSummary>, ApiError> {
        if !self.healthy.load(Ordering::SeqCst) {
            return Err(ApiError::Status(503));
        }
        self.inner.symbols().await
    }

    async fn analysis(
        &self,
        symbol: &str,
        period: Option<Period>,
    ) -> Result<AnalysisResult, ApiError> {
        if !self.healthy.load(Ordering::SeqCst) {
            return Err(ApiError::Malformed("expected JSON object".to_string()));
        }
        self.inner.analysis(symbol, period).await
    }
}

#[tokio::test]
async fn test_symbol_list_screen() {
    let mut dashboard = dashboard(static_api());
    let output = dashboard.navigate(Screen::SymbolList).await;

    assert!(!output.is_error());
    assert_eq!(dashboard.current_screen(), Some(&Screen::SymbolList));
    match output.data {
        Some(ScreenData::Symbols(rows)) => assert_eq!(rows.len(), 3),
        other => panic!("unexpected screen data: {:?}", other),
    }
    assert!(output.html.contains("/analysis/ETHUSDT"));
    assert_eq!(dashboard.charts().live(), 0);
}

#[tokio::test]
async fn test_analysis_screen_draws_charts() {
    let mut dashboard = dashboard(static_api());
    let output = dashboard.show_analysis("BTCUSDT", Period::ThirtyDays).await;

    assert!(!output.is_error());
    assert_eq!(output.screen, Screen::analysis("BTCUSDT", Period::ThirtyDays));
    assert_eq!(output.screen.title(), "BTCUSDT (30d)");
    assert!(matches!(output.data, Some(ScreenData::Analysis(_))));
    assert_eq!(dashboard.charts().live(), 3);
    assert_eq!(dashboard.charts().surface().live_count(), 3);
}

#[tokio::test]
async fn test_failed_transition_clears_previous_charts() {
    let mut dashboard = dashboard(static_api());
    dashboard.show_analysis("BTCUSDT", Period::NinetyDays).await;
    assert_eq!(dashboard.charts().live(), 3);

    let output = dashboard.show_analysis("FOOUSDT", Period::NinetyDays).await;
    assert!(output.is_error());
    assert_eq!(output.error.as_deref(), Some("No analysis available for FOOUSDT"));
    assert!(output.html.contains(r#"role="alert""#));
    assert!(output.html.contains("Error: No analysis available for FOOUSDT"));
    assert!(output.data.is_none());
    assert_eq!(dashboard.charts().live(), 0);
    assert_eq!(dashboard.charts().surface().live_count(), 0);
    assert_eq!(dashboard.charts().surface().destroyed_count(), 3);
}

#[tokio::test]
async fn test_backend_error_document_is_an_error() {
    let mut dashboard = dashboard(static_api());
    let output = dashboard.show_analysis("BADUSDT", Period::SevenDays).await;
    assert_eq!(output.error.as_deref(), Some("Insufficient data for BADUSDT"));
    assert_eq!(dashboard.charts().live(), 0);
}

#[tokio::test]
async fn test_dashboard_recovers_after_failures() {
    let flaky = Arc::new(FlakyApi {
        healthy: AtomicBool::new(false),
        inner: static_api(),
    });
    let mut dashboard = dashboard(flaky.clone());

    let output = dashboard.navigate(Screen::SymbolList).await;
    assert_eq!(output.error.as_deref(), Some("Backend returned HTTP 503"));

    let output = dashboard.navigate(Screen::analysis("BTCUSDT", Period::NinetyDays)).await;
    assert_eq!(
        output.error.as_deref(),
        Some("Malformed response: expected JSON object")
    );
    assert_eq!(dashboard.charts().live(), 0);

    flaky.recover();
    let output = dashboard.navigate(Screen::analysis("BTCUSDT", Period::NinetyDays)).await;
    assert!(!output.is_error());
    assert_eq!(dashboard.charts().live(), 3);

    // Going back to the list releases the analysis charts.
    let output = dashboard.navigate(Screen::SymbolList).await;
    assert!(!output.is_error());
    assert_eq!(dashboard.charts().live(), 0);
}

#[test]
fn test_navigation_without_runtime_macro() {
    let mut dashboard = dashboard(static_api());
    let output = tokio_test::block_on(dashboard.navigate(Screen::SymbolList));
    assert!(!output.is_error());
    assert_eq!(output.screen.title(), "Markets");
}
