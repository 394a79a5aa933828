//! Unit tests for chart specs and the chart scope

use cryptovault::models::AnalysisResult;
use cryptovault::render::{
    analysis_charts, ChartHandle, ChartKind, ChartScope, ChartSpec, ChartSurface, RecordingSurface,
};
use cryptovault::signals::SignalTally;
use serde_json::json;

use crate::fixtures;

fn ids(specs: &[ChartSpec]) -> Vec<&str> {
    specs.iter().map(|s| s.id.as_str()).collect()
}

#[test]
fn test_charts_from_fixture() {
    let analysis = AnalysisResult::from_json(&fixtures::analysis_payload());
    let specs = analysis_charts(&analysis, None);

    // No lstm series shipped: forecast is charted instead.
    assert_eq!(ids(&specs), vec!["price-chart", "lstm-chart", "signals-chart"]);
    let lstm = &specs[1];
    assert_eq!(lstm.labels, vec!["Mar 02", "Mar 03", "Mar 04"]);
    assert_eq!(lstm.series[0].data, vec![Some(50400.0), Some(50800.0), Some(51000.0)]);
    assert_eq!(specs[2].kind, ChartKind::Doughnut);
}

#[test]
fn test_distribution_falls_back_to_tally() {
    let analysis = AnalysisResult::default();
    let tally = SignalTally {
        buy: 3,
        sell: 1,
        hold: 0,
    };
    let specs = analysis_charts(&analysis, Some(&tally));
    assert_eq!(ids(&specs), vec!["signals-chart"]);
    assert_eq!(specs[0].series[0].data, vec![Some(3.0), Some(1.0), Some(0.0)]);

    assert!(analysis_charts(&analysis, Some(&SignalTally::default())).is_empty());
    assert!(analysis_charts(&analysis, None).is_empty());
}

#[test]
fn test_empty_series_are_dropped() {
    let analysis = AnalysisResult::from_json(&json!({
        "charts": {
            "price": {"labels": [], "datasets": []},
            "technical": {"labels": ["a"], "datasets": [{"label": "RSI", "data": [null]}]}
        }
    }));
    assert!(analysis_charts(&analysis, None).is_empty());
}

fn spec(id: &str) -> ChartSpec {
    let analysis = AnalysisResult::from_json(&json!({
        "charts": {"price": {"labels": ["a"], "datasets": [{"label": "x", "data": [1.0]}]}}
    }));
    let mut spec = analysis_charts(&analysis, None).remove(0);
    spec.id = id.to_string();
    spec
}

#[test]
fn test_scope_replace_destroys_previous_charts() {
    let mut surface = RecordingSurface::new();
    {
        let mut scope = ChartScope::new(&mut surface);
        scope.replace(&[spec("a"), spec("b")]);
        assert_eq!(scope.live(), 2);
        assert_eq!(scope.surface().live_count(), 2);

        scope.replace(&[spec("c")]);
        assert_eq!(scope.live(), 1);
        assert_eq!(scope.surface().live_count(), 1);
        assert_eq!(scope.surface().destroyed_count(), 2);
        assert_eq!(scope.surface().live_specs()[0].id, "c");
    }
    // Dropping the scope releases what it still owned.
    assert_eq!(surface.live_count(), 0);
    assert_eq!(surface.destroyed_count(), 3);
}

#[test]
fn test_scope_clear_is_idempotent() {
    let mut surface = RecordingSurface::new();
    let mut scope = ChartScope::new(&mut surface);
    scope.replace(&[spec("a")]);
    scope.clear();
    scope.clear();
    assert_eq!(scope.live(), 0);
    assert_eq!(scope.surface().destroyed_count(), 1);
}

/// Surface that logs every call, to check ordering.
#[derive(Default)]
struct EventLog {
    next: u64,
    events: Vec<String>,
}

impl ChartSurface for EventLog {
    fn draw(&mut self, spec: &ChartSpec) -> ChartHandle {
        self.next += 1;
        self.events.push(format!("draw {}", spec.id));
        ChartHandle(self.next)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.events.push(format!("destroy {}", handle.0));
    }
}

#[test]
fn test_scope_destroys_before_drawing() {
    let mut log = EventLog::default();
    {
        let mut scope = ChartScope::new(&mut log);
        scope.replace(&[spec("a")]);
        scope.replace(&[spec("b")]);
    }
    assert_eq!(log.events, vec!["draw a", "destroy 1", "draw b", "destroy 2"]);
}
