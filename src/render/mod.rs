//! Rendering layer: view models, HTML markup and chart resources.
//!
//! # Architecture
//! - `views.rs`: display-ready view models built from decoded backend data
//! - `html.rs`: markup for the symbol list, analysis and error screens
//! - `charts.rs`: chart specs and the scoped chart resource handle

pub mod charts;
pub mod html;
pub mod views;

pub use charts::{
    analysis_charts, ChartHandle, ChartKind, ChartScope, ChartSeries, ChartSpec, ChartSurface,
    RecordingSurface,
};
pub use html::{
    analysis_href, escape_html, render_analysis, render_error, render_page, render_symbol_list,
};
pub use views::{
    AnalysisView, IndicatorRow, MetricRow, PredictionView, SentimentView, SignalBadge, SymbolRow,
    TimeframeView,
};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::formatting::{ChangeSource, Placeholder};
use crate::signals::ConfidenceSources;

/// How much detail the analysis screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Signal badges and headline numbers only.
    Compact,
    /// Daily indicator tables, sentiment and model panels.
    #[default]
    Standard,
    /// Every timeframe, forecast table and backend reasoning.
    Detailed,
}

impl FromStr for RenderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "standard" => Ok(Self::Standard),
            "detailed" => Ok(Self::Detailed),
            other => Err(format!("unknown render style: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub style: RenderStyle,
    pub placeholder: Placeholder,
    pub change_source: ChangeSource,
    pub confidence_sources: ConfidenceSources,
}

impl RenderOptions {
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }
}
