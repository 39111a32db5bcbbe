//! Prometheus metrics

use ::metrics::{counter, gauge, histogram};
use std::time::Duration;

/// What a retrieval request was fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// OHLC candle series
    Candles,
    /// 24h ticker statistics
    Ticker,
}

impl FetchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchKind::Candles => "candles",
            FetchKind::Ticker => "ticker",
        }
    }
}

/// Record one exchange request
pub fn record_fetch(kind: FetchKind, latency: Duration, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    histogram!("screener_fetch_latency_ms", "kind" => kind.as_str())
        .record(latency.as_secs_f64() * 1000.0);
    counter!("screener_fetch_total", "kind" => kind.as_str(), "outcome" => outcome).increment(1);
}

/// Record the totals of a finished scan
pub fn record_scan(scanned: usize, matched: usize, skipped: usize) {
    gauge!("screener_scan_scanned").set(scanned as f64);
    gauge!("screener_scan_matched").set(matched as f64);
    gauge!("screener_scan_skipped").set(skipped as f64);
    counter!("screener_scans_total").increment(1);
}
