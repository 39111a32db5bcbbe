//! Instrument universe narrowing

use crate::feed::Ticker24h;

/// Symbols of the `k` tickers with the highest quote volume, highest first
///
/// Ties keep their input order.
pub fn top_by_volume(mut tickers: Vec<Ticker24h>, k: usize) -> Vec<String> {
    tickers.sort_by(|a, b| b.quote_volume.cmp(&a.quote_volume));
    tickers.into_iter().take(k).map(|t| t.symbol).collect()
}
