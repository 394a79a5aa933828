//! Screen controller.
//!
//! A transition always releases the previous screen's charts first, fetches
//! exactly once, and renders either the screen or an inline error. Failures
//! never leave stale charts behind and never stop the dashboard from taking
//! the next transition.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{Period, SymbolSummary};
use crate::render::{
    analysis_charts, render_analysis, render_error, render_symbol_list, AnalysisView, ChartScope,
    ChartSurface, RenderOptions, SymbolRow,
};
use crate::services::{ApiError, MarketApi};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    SymbolList,
    Analysis { symbol: String, period: Period },
}

impl Screen {
    pub fn analysis(symbol: impl Into<String>, period: Period) -> Self {
        Self::Analysis {
            symbol: symbol.into(),
            period,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::SymbolList => "Markets".to_string(),
            Self::Analysis { symbol, period } => format!("{} ({})", symbol, period),
        }
    }
}

/// Data behind a successfully rendered screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScreenData {
    Symbols(Vec<SymbolRow>),
    Analysis(Box<AnalysisView>),
}

/// What a transition produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenOutput {
    pub screen: Screen,
    /// Markup fragment, either the screen or the inline error.
    pub html: String,
    pub data: Option<ScreenData>,
    pub error: Option<String>,
}

impl ScreenOutput {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn failed(screen: Screen, err: &ApiError) -> Self {
        let message = err.user_message();
        Self {
            screen,
            html: render_error(&message),
            data: None,
            error: Some(message),
        }
    }
}

pub struct Dashboard<S: ChartSurface> {
    api: Arc<dyn MarketApi>,
    charts: ChartScope<S>,
    options: RenderOptions,
    current: Option<Screen>,
}

impl<S: ChartSurface> Dashboard<S> {
    pub fn new(api: Arc<dyn MarketApi>, surface: S, options: RenderOptions) -> Self {
        Self {
            api,
            charts: ChartScope::new(surface),
            options,
            current: None,
        }
    }

    pub fn current_screen(&self) -> Option<&Screen> {
        self.current.as_ref()
    }

    pub fn charts(&self) -> &ChartScope<S> {
        &self.charts
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub async fn navigate(&mut self, screen: Screen) -> ScreenOutput {
        match screen {
            Screen::SymbolList => self.show_symbols().await,
            Screen::Analysis { symbol, period } => self.show_analysis(&symbol, period).await,
        }
    }

    pub async fn show_symbols(&mut self) -> ScreenOutput {
        let screen = self.enter(Screen::SymbolList);
        match self.api.symbols().await {
            Ok(symbols) => self.symbols_loaded(screen, &symbols),
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Failed to load symbols");
                ScreenOutput::failed(screen, &e)
            }
        }
    }

    pub async fn show_analysis(&mut self, symbol: &str, period: Period) -> ScreenOutput {
        let screen = self.enter(Screen::analysis(symbol, period));
        match self.api.analysis(symbol, Some(period)).await {
            Ok(analysis) => {
                if let Some(message) = analysis.backend_error() {
                    let err = ApiError::Backend(message.to_string());
                    warn!(symbol = %symbol, error = %err, "Backend reported analysis error");
                    return ScreenOutput::failed(screen, &err);
                }
                let view = AnalysisView::build(symbol, period, &analysis, &self.options);
                let daily_tally = view.timeframes.first().map(|tf| tf.tally);
                self.charts
                    .replace(&analysis_charts(&analysis, daily_tally.as_ref()));
                info!(
                    symbol = %symbol,
                    period = %period,
                    signal = %view.recommendation.category,
                    confidence = view.confidence,
                    "Rendered analysis"
                );
                ScreenOutput {
                    html: render_analysis(&view, self.options.style),
                    screen,
                    data: Some(ScreenData::Analysis(Box::new(view))),
                    error: None,
                }
            }
            Err(e) => {
                warn!(symbol = %symbol, period = %period, error = %e, kind = e.kind(), "Failed to load analysis");
                ScreenOutput::failed(screen, &e)
            }
        }
    }

    /// Release the previous screen's charts before anything can fail.
    fn enter(&mut self, screen: Screen) -> Screen {
        self.charts.clear();
        self.current = Some(screen.clone());
        screen
    }

    fn symbols_loaded(&mut self, screen: Screen, symbols: &[SymbolSummary]) -> ScreenOutput {
        let rows: Vec<SymbolRow> = symbols
            .iter()
            .map(|s| SymbolRow::from_summary(s, &self.options))
            .collect();
        info!(count = rows.len(), "Rendered symbol list");
        ScreenOutput {
            html: render_symbol_list(&rows, self.options.style),
            screen,
            data: Some(ScreenData::Symbols(rows)),
            error: None,
        }
    }
}
