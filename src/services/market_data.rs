//! Backend data source interface.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::models::{AnalysisResult, Period, SymbolSummary};
use crate::services::error::ApiError;

#[async_trait]
pub trait MarketApi: Send + Sync {
    /// `GET /api/symbols`
    async fn symbols(&self) -> Result<Vec<SymbolSummary>, ApiError>;

    /// `GET /api/analysis/complete/{symbol}`, with `?period=` when given.
    async fn analysis(
        &self,
        symbol: &str,
        period: Option<Period>,
    ) -> Result<AnalysisResult, ApiError>;
}

/// In-memory source serving fixed documents. Unknown symbols answer with the
/// backend-style `{"error": ...}` failure.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketApi {
    symbols: Vec<SymbolSummary>,
    analyses: HashMap<String, AnalysisResult>,
}

impl StaticMarketApi {
    pub fn new(symbols: Vec<SymbolSummary>) -> Self {
        Self {
            symbols,
            analyses: HashMap::new(),
        }
    }

    pub fn with_analysis(mut self, symbol: impl Into<String>, analysis: AnalysisResult) -> Self {
        self.analyses.insert(symbol.into(), analysis);
        self
    }
}

#[async_trait]
impl MarketApi for StaticMarketApi {
    async fn symbols(&self) -> Result<Vec<SymbolSummary>, ApiError> {
        Ok(self.symbols.clone())
    }

    async fn analysis(
        &self,
        symbol: &str,
        _period: Option<Period>,
    ) -> Result<AnalysisResult, ApiError> {
        self.analyses
            .get(symbol)
            .cloned()
            .ok_or_else(|| ApiError::Backend(format!("No analysis available for {}", symbol)))
    }
}
