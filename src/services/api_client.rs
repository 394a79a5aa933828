//! reqwest client for the analysis backend REST API.
//!
//! One request per call: no timeout, retry or backoff is layered on top, so a
//! failure surfaces immediately as an [`ApiError`].

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::metrics::Metrics;
use crate::models::{AnalysisResult, Period, SymbolSummary};
use crate::services::error::ApiError;
use crate::services::market_data::MarketApi;

const SYMBOLS_ENDPOINT: &str = "symbols";
const ANALYSIS_ENDPOINT: &str = "analysis";

pub struct HttpMarketApi {
    base_url: Url,
    client: reqwest::Client,
    metrics: Option<Arc<Metrics>>,
}

impl HttpMarketApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            client,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url, endpoint: &'static str) -> Result<Value, ApiError> {
        let result = self.fetch(url.clone()).await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => {
                warn!(url = %url, error = %e, kind = e.kind(), "Backend request failed");
                e.kind()
            }
        };
        if let Some(metrics) = &self.metrics {
            metrics.record_backend_request(endpoint, outcome);
        }
        result
    }

    async fn fetch(&self, url: Url) -> Result<Value, ApiError> {
        debug!(url = %url, "Fetching from backend");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if body.trim().is_empty() {
            return Err(if status.is_success() {
                ApiError::Malformed("empty response".to_string())
            } else {
                ApiError::Status(status.as_u16())
            });
        }

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => return Err(ApiError::Status(status.as_u16())),
            Err(e) => return Err(ApiError::Malformed(e.to_string())),
        };

        if let Some(message) = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
        {
            return Err(ApiError::Backend(message.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(value)
    }
}

#[async_trait]
impl MarketApi for HttpMarketApi {
    async fn symbols(&self) -> Result<Vec<SymbolSummary>, ApiError> {
        let url = self.endpoint(&["api", "symbols"])?;
        let value = self.get_json(url, SYMBOLS_ENDPOINT).await?;
        let Value::Array(records) = value else {
            return Err(ApiError::Malformed("expected a list of symbols".to_string()));
        };
        let symbols: Vec<SymbolSummary> = records
            .iter()
            .map(SymbolSummary::from_json)
            .filter(|s| !s.symbol.is_empty())
            .collect();
        debug!(count = symbols.len(), "Fetched symbols");
        Ok(symbols)
    }

    async fn analysis(
        &self,
        symbol: &str,
        period: Option<Period>,
    ) -> Result<AnalysisResult, ApiError> {
        let mut url = self.endpoint(&["api", "analysis", "complete", symbol])?;
        if let Some(period) = period {
            url.query_pairs_mut().append_pair("period", period.as_str());
        }
        let value = self.get_json(url, ANALYSIS_ENDPOINT).await?;
        if !value.is_object() {
            return Err(ApiError::Malformed("expected an analysis object".to_string()));
        }
        debug!(symbol = %symbol, period = ?period, "Fetched analysis");
        Ok(AnalysisResult::from_json(&value))
    }
}
