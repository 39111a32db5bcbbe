//! Screening pipeline
//!
//! universe -> optional volume narrowing -> paced retrieval -> snapshot ->
//! filter -> score -> ranked report

use super::report::{ScanReport, ScanResult};
use super::universe::top_by_volume;
use crate::feed::{ExchangeDataSource, FetchError, Interval, OhlcSeries, ParseIntervalError};
use crate::filter::{matches, score, CriteriaError, FilterCriteria};
use crate::indicators::IndicatorSnapshot;
use crate::retrieval::{ProgressObserver, RetrievalConfig, RetrievalOrchestrator};
use crate::telemetry::record_scan;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

/// Fewest candles that cover every indicator in a snapshot (SMA50)
pub const MIN_CANDLES: usize = 50;
/// Exchange cap on candles per request
pub const MAX_CANDLES: usize = 1000;

/// Pipeline-fatal errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Bad input, detected before any network activity
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Instrument universe could not be listed
    #[error("Failed to list instruments: {0}")]
    Universe(#[source] FetchError),
    /// Nothing left to scan
    #[error("No instruments to scan for quote asset {0}")]
    NoInstruments(String),
}

impl From<CriteriaError> for ScanError {
    fn from(e: CriteriaError) -> Self {
        ScanError::InvalidParameter(e.to_string())
    }
}

impl From<ParseIntervalError> for ScanError {
    fn from(e: ParseIntervalError) -> Self {
        ScanError::InvalidParameter(e.to_string())
    }
}

/// Parameters of one scan
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub quote_asset: String,
    pub interval: Interval,
    /// Candles per symbol
    pub limit: usize,
    /// Narrow the universe to the K most traded symbols first
    pub top_volume: Option<usize>,
    /// Truncate ranked results
    pub max_results: Option<usize>,
    pub criteria: FilterCriteria,
}

impl ScanRequest {
    pub fn new(quote_asset: impl Into<String>, interval: Interval, criteria: FilterCriteria) -> Self {
        Self {
            quote_asset: quote_asset.into(),
            interval,
            limit: 100,
            top_volume: None,
            max_results: None,
            criteria,
        }
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.quote_asset.trim().is_empty() {
            return Err(ScanError::InvalidParameter(
                "quote asset must not be empty".to_string(),
            ));
        }
        if !(MIN_CANDLES..=MAX_CANDLES).contains(&self.limit) {
            return Err(ScanError::InvalidParameter(format!(
                "candle count {} outside {}..={}",
                self.limit, MIN_CANDLES, MAX_CANDLES
            )));
        }
        if self.top_volume == Some(0) {
            return Err(ScanError::InvalidParameter(
                "top volume count must be at least 1".to_string(),
            ));
        }
        if self.max_results == Some(0) {
            return Err(ScanError::InvalidParameter(
                "max results must be at least 1".to_string(),
            ));
        }
        self.criteria.validate()?;
        Ok(())
    }
}

/// Matches found in a set of series
#[derive(Debug, Clone, Default)]
pub struct Screening {
    /// Matches ordered by descending score
    pub results: Vec<ScanResult>,
    /// Series that reached analysis
    pub scanned: usize,
    /// Series skipped for insufficient data
    pub skipped: usize,
}

/// Analyse, filter and rank already-fetched series
///
/// Series too short for the indicator set are skipped but still counted as
/// scanned. Equal scores keep input order.
pub fn screen<I>(series: I, criteria: &FilterCriteria) -> Screening
where
    I: IntoIterator<Item = (String, OhlcSeries)>,
{
    let mut screening = Screening::default();

    for (symbol, series) in series {
        screening.scanned += 1;

        let snapshot = match IndicatorSnapshot::from_series(&series) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::debug!(symbol = %symbol, error = %e, "Skipping symbol");
                screening.skipped += 1;
                continue;
            }
        };

        if matches(&snapshot, criteria) {
            let score = score(&snapshot);
            screening.results.push(ScanResult::new(symbol, snapshot, score));
        }
    }

    screening.results.sort_by(|a, b| b.score.cmp(&a.score));
    screening
}

/// Runs scans against an exchange data source
pub struct Screener<S> {
    source: Arc<S>,
    orchestrator: RetrievalOrchestrator<S>,
}

impl<S: ExchangeDataSource> Screener<S> {
    pub fn new(source: Arc<S>, retrieval: RetrievalConfig) -> Self {
        let orchestrator = RetrievalOrchestrator::new(source.clone(), retrieval);
        Self {
            source,
            orchestrator,
        }
    }

    /// Run one scan end to end
    ///
    /// Parameters are validated before any request is made. Per-symbol fetch
    /// and indicator failures are skipped; only an unlistable or empty
    /// universe aborts the run.
    pub async fn run(
        &self,
        request: &ScanRequest,
        progress: Option<&dyn ProgressObserver>,
    ) -> Result<ScanReport, ScanError> {
        request.validate()?;
        if self.orchestrator.config().batch_size == 0 {
            return Err(ScanError::InvalidParameter(
                "batch size must be at least 1".to_string(),
            ));
        }

        let mut symbols = self
            .source
            .list_tradable_pairs(&request.quote_asset)
            .await
            .map_err(ScanError::Universe)?;

        tracing::info!(
            quote_asset = %request.quote_asset,
            count = symbols.len(),
            "Listed tradable pairs"
        );

        if let Some(k) = request.top_volume {
            let tickers = self.orchestrator.fetch_tickers(&symbols, None).await;
            // Keep universe order for equal volumes
            let ordered = symbols
                .iter()
                .filter_map(|s| tickers.fetched.get(s).cloned())
                .collect();
            symbols = top_by_volume(ordered, k);
            tracing::info!(top = k, kept = symbols.len(), "Narrowed universe by volume");
        }

        if symbols.is_empty() {
            return Err(ScanError::NoInstruments(request.quote_asset.clone()));
        }

        let mut outcome = self
            .orchestrator
            .fetch_series(&symbols, request.interval, request.limit, progress)
            .await;

        let fetched = symbols
            .iter()
            .filter_map(|s| outcome.fetched.remove(s).map(|series| (s.clone(), series)));
        let screening = screen(fetched, &request.criteria);

        let matched_count = screening.results.len();
        let mut results = screening.results;
        if let Some(max) = request.max_results {
            results.truncate(max);
        }

        record_scan(screening.scanned, matched_count, screening.skipped);
        tracing::info!(
            scanned = screening.scanned,
            skipped = screening.skipped,
            failed = outcome.failures.len(),
            matched = matched_count,
            "Scan complete"
        );

        Ok(ScanReport {
            timestamp: Utc::now(),
            interval: request.interval,
            filters: request.criteria.clone(),
            results,
            total_scanned: screening.scanned,
            matched_count,
            failed_symbols: outcome.failures.into_iter().map(|(s, _)| s).collect(),
        })
    }
}
