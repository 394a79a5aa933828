//! HTTP endpoint server using Axum
//!
//! Serves the rendered dashboard screens, their view models as JSON, a health
//! check and Prometheus metrics. Each request builds its own dashboard, so the
//! server holds no per-user state.

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::Config;
use crate::dashboard::{Dashboard, Screen, ScreenOutput};
use crate::metrics::Metrics;
use crate::models::Period;
use crate::render::{render_page, RecordingSurface, RenderOptions};
use crate::services::{HttpMarketApi, MarketApi};

pub const SERVICE_NAME: &str = "cryptovault-dashboard";

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub api: Arc<dyn MarketApi>,
    pub options: Arc<RenderOptions>,
    pub backend_url: Arc<str>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    period: Option<String>,
}

impl AppState {
    fn dashboard(&self) -> Dashboard<RecordingSurface> {
        Dashboard::new(
            self.api.clone(),
            RecordingSurface::new(),
            (*self.options).clone(),
        )
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME,
        "backend": state.backend_url.as_ref(),
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Full page for a screen; backend failures become an inline error with 502.
fn page_response(output: ScreenOutput, dashboard: &Dashboard<RecordingSurface>) -> Response {
    let charts = dashboard.charts().surface().live_specs();
    let page = render_page(&output.screen.title(), &output.html, &charts);
    let status = if output.is_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Html(page)).into_response()
}

fn view_response(output: ScreenOutput) -> Response {
    match (output.data, output.error) {
        (Some(data), None) => Json(json!(data)).into_response(),
        (_, error) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": error.unwrap_or_else(|| "Unknown error".to_string()) })),
        )
            .into_response(),
    }
}

async fn symbols_page(State(state): State<AppState>) -> Response {
    let mut dashboard = state.dashboard();
    let output = dashboard.navigate(Screen::SymbolList).await;
    page_response(output, &dashboard)
}

async fn analysis_page(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let period = Period::parse_or_default(query.period.as_deref());
    let mut dashboard = state.dashboard();
    let output = dashboard.navigate(Screen::analysis(symbol, period)).await;
    page_response(output, &dashboard)
}

async fn symbols_view(State(state): State<AppState>) -> Response {
    let mut dashboard = state.dashboard();
    view_response(dashboard.navigate(Screen::SymbolList).await)
}

async fn analysis_view(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let period = Period::parse_or_default(query.period.as_deref());
    let mut dashboard = state.dashboard();
    view_response(dashboard.navigate(Screen::analysis(symbol, period)).await)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(symbols_page))
        .route("/analysis/{symbol}", get(analysis_page))
        .route("/api/view/symbols", get(symbols_view))
        .route("/api/view/analysis/{symbol}", get(analysis_view))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let api = HttpMarketApi::new(&config.backend_url)?.with_metrics(metrics.clone());

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        api: Arc::new(api),
        options: Arc::new(config.render.clone()),
        backend_url: Arc::from(config.backend_url.as_str()),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(backend = %config.backend_url, "Analysis backend");
    axum::serve(listener, app).await?;

    Ok(())
}
