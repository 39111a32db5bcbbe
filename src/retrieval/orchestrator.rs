//! Retrieval orchestrator

use crate::feed::{ExchangeDataSource, FetchError, Interval, OhlcSeries, Ticker24h};
use crate::telemetry::{record_fetch, FetchKind};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Request pacing for one retrieval run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalConfig {
    /// Symbols per batch
    pub batch_size: usize,
    /// Delay between consecutive requests inside a batch
    pub inter_request_delay: Duration,
    /// Delay between batches (not applied after the last one)
    pub inter_batch_delay: Duration,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            inter_request_delay: Duration::from_millis(100),
            inter_batch_delay: Duration::from_secs(1),
        }
    }
}

/// Receives `(processed, total, symbol)` after every symbol, success or not
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, processed: usize, total: usize, symbol: &str);
}

impl<F> ProgressObserver for F
where
    F: Fn(usize, usize, &str) + Send + Sync,
{
    fn on_progress(&self, processed: usize, total: usize, symbol: &str) {
        self(processed, total, symbol)
    }
}

/// Result of a retrieval run
#[derive(Debug)]
pub struct RetrievalOutcome<T> {
    /// Successfully fetched symbols
    pub fetched: HashMap<String, T>,
    /// Symbols that failed, in the order they were attempted
    pub failures: Vec<(String, FetchError)>,
}

impl<T> Default for RetrievalOutcome<T> {
    fn default() -> Self {
        Self {
            fetched: HashMap::new(),
            failures: Vec::new(),
        }
    }
}

/// Fetches data for many symbols under a fixed request cadence
pub struct RetrievalOrchestrator<S> {
    source: Arc<S>,
    config: RetrievalConfig,
}

impl<S: ExchangeDataSource> RetrievalOrchestrator<S> {
    /// Create an orchestrator; `config.batch_size` must be non-zero
    pub fn new(source: Arc<S>, config: RetrievalConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Fetch candle series for every symbol
    pub async fn fetch_series(
        &self,
        symbols: &[String],
        interval: Interval,
        limit: usize,
        progress: Option<&dyn ProgressObserver>,
    ) -> RetrievalOutcome<OhlcSeries> {
        self.run_paced(FetchKind::Candles, symbols, progress, |symbol| async move {
            self.source.get_candles(&symbol, interval, limit).await
        })
        .await
    }

    /// Fetch 24h tickers for every symbol
    pub async fn fetch_tickers(
        &self,
        symbols: &[String],
        progress: Option<&dyn ProgressObserver>,
    ) -> RetrievalOutcome<Ticker24h> {
        self.run_paced(FetchKind::Ticker, symbols, progress, |symbol| async move {
            self.source.get_24h_ticker(&symbol).await
        })
        .await
    }

    async fn run_paced<T, F, Fut>(
        &self,
        kind: FetchKind,
        symbols: &[String],
        progress: Option<&dyn ProgressObserver>,
        fetch: F,
    ) -> RetrievalOutcome<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let total = symbols.len();
        let batch_size = self.config.batch_size.max(1);
        let batch_count = total.div_ceil(batch_size);
        let mut outcome = RetrievalOutcome::default();
        let mut processed = 0;

        tracing::info!(
            kind = kind.as_str(),
            total,
            batch_size,
            batch_count,
            "Starting paced retrieval"
        );

        for (batch_index, batch) in symbols.chunks(batch_size).enumerate() {
            tracing::debug!(batch = batch_index + 1, batch_count, "Fetching batch");

            for (i, symbol) in batch.iter().enumerate() {
                if i > 0 {
                    pause(self.config.inter_request_delay).await;
                }

                let started = Instant::now();
                let result = fetch(symbol.clone()).await;
                record_fetch(kind, started.elapsed(), result.is_ok());

                match result {
                    Ok(value) => {
                        outcome.fetched.insert(symbol.clone(), value);
                    }
                    Err(e) => {
                        tracing::warn!(symbol = %symbol, kind = kind.as_str(), error = %e, "Fetch failed, skipping symbol");
                        outcome.failures.push((symbol.clone(), e));
                    }
                }

                processed += 1;
                if let Some(observer) = progress {
                    observer.on_progress(processed, total, symbol);
                }
            }

            if batch_index + 1 < batch_count {
                pause(self.config.inter_batch_delay).await;
            }
        }

        tracing::info!(
            kind = kind.as_str(),
            fetched = outcome.fetched.len(),
            failed = outcome.failures.len(),
            "Paced retrieval complete"
        );

        outcome
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
