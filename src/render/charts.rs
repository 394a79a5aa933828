//! Chart specs and their lifecycle.
//!
//! Charts are drawn on a [`ChartSurface`]. A [`ChartScope`] owns the surface
//! for one screen and every chart drawn on it: stale charts are destroyed
//! before new ones are drawn, on clear, and when the scope is dropped.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{AnalysisResult, ChartData, SignalCategory};
use crate::signals::SignalTally;

const PALETTE: [&str; 6] = ["#667eea", "#27ae60", "#e67e22", "#0984e3", "#9b59b6", "#2d3436"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    fn line(id: &str, title: &str, data: &ChartData) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind: ChartKind::Line,
            labels: data.labels.clone(),
            series: data
                .datasets
                .iter()
                .enumerate()
                .map(|(i, dataset)| ChartSeries {
                    label: dataset.label.clone(),
                    data: dataset.data.iter().map(|n| n.value()).collect(),
                    colors: vec![PALETTE[i % PALETTE.len()].to_string()],
                })
                .collect(),
        }
    }

    fn distribution(tally: &SignalTally) -> Self {
        Self {
            id: "signals-chart".to_string(),
            title: "Signal Distribution".to_string(),
            kind: ChartKind::Doughnut,
            labels: vec!["Buy".to_string(), "Sell".to_string(), "Hold".to_string()],
            series: vec![ChartSeries {
                label: "Signals".to_string(),
                data: SignalCategory::ALL
                    .iter()
                    .map(|c| Some(tally.count(*c) as f64))
                    .collect(),
                colors: ["#27ae60", "#e74c3c", "#f39c12"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.series.iter().all(|s| s.data.iter().all(Option::is_none))
    }
}

/// Charts for the analysis screen. Series shipped by the backend are used as
/// is; without them the forecast and the daily signal tally are charted.
pub fn analysis_charts(analysis: &AnalysisResult, daily_tally: Option<&SignalTally>) -> Vec<ChartSpec> {
    let bundle = analysis.charts.clone().unwrap_or_default();
    let mut specs = Vec::new();

    if let Some(price) = &bundle.price {
        specs.push(ChartSpec::line("price-chart", "Price", price));
    }
    if let Some(technical) = &bundle.technical {
        specs.push(ChartSpec::line("technical-chart", "Technical Indicators", technical));
    }
    match &bundle.lstm {
        Some(lstm) => specs.push(ChartSpec::line("lstm-chart", "LSTM Forecast", lstm)),
        None => {
            if let Some(prediction) = &analysis.lstm_prediction {
                let points = prediction.forecast();
                let data = ChartData {
                    labels: points.iter().map(|p| p.label()).collect(),
                    datasets: vec![crate::models::ChartDataset {
                        label: "Forecast".to_string(),
                        data: points.iter().map(|p| p.price).collect(),
                    }],
                };
                specs.push(ChartSpec::line("lstm-chart", "LSTM Forecast", &data));
            }
        }
    }
    match (&bundle.signals_distribution, daily_tally) {
        (Some(distribution), _) => {
            let mut spec = ChartSpec::line("signals-chart", "Signal Distribution", distribution);
            spec.kind = ChartKind::Doughnut;
            specs.push(spec);
        }
        (None, Some(tally)) if tally.total() > 0 => specs.push(ChartSpec::distribution(tally)),
        _ => {}
    }

    specs.retain(|spec| !spec.is_empty());
    specs
}

/// Opaque id of a drawn chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartHandle(pub u64);

pub trait ChartSurface {
    fn draw(&mut self, spec: &ChartSpec) -> ChartHandle;
    fn destroy(&mut self, handle: ChartHandle);
}

impl<S: ChartSurface + ?Sized> ChartSurface for &mut S {
    fn draw(&mut self, spec: &ChartSpec) -> ChartHandle {
        (**self).draw(spec)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        (**self).destroy(handle)
    }
}

/// Surface that keeps the specs of live charts, for embedding into a page.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_id: u64,
    live: BTreeMap<ChartHandle, ChartSpec>,
    destroyed: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_specs(&self) -> Vec<&ChartSpec> {
        self.live.values().collect()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }
}

impl ChartSurface for RecordingSurface {
    fn draw(&mut self, spec: &ChartSpec) -> ChartHandle {
        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.live.insert(handle, spec.clone());
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if self.live.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }
}

/// Charts owned by the current screen.
pub struct ChartScope<S: ChartSurface> {
    surface: S,
    handles: Vec<ChartHandle>,
}

impl<S: ChartSurface> ChartScope<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            handles: Vec::new(),
        }
    }

    /// Destroy every chart of the previous screen, then draw `specs`.
    pub fn replace(&mut self, specs: &[ChartSpec]) {
        self.clear();
        self.handles = specs.iter().map(|spec| self.surface.draw(spec)).collect();
    }

    pub fn clear(&mut self) {
        for handle in self.handles.drain(..) {
            self.surface.destroy(handle);
        }
    }

    pub fn live(&self) -> usize {
        self.handles.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: ChartSurface> Drop for ChartScope<S> {
    fn drop(&mut self) {
        self.clear();
    }
}
