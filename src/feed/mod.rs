//! Exchange data source module
//!
//! Supplies trading pairs, OHLC series and 24h tickers from the exchange

mod binance;
mod types;

pub use binance::{BinanceClient, BinanceConfig, BINANCE_API_URL};
pub use types::{Candle, FetchError, Interval, OhlcSeries, ParseIntervalError, Ticker24h};

use async_trait::async_trait;

/// Trait for exchange market data sources
#[async_trait]
pub trait ExchangeDataSource: Send + Sync {
    /// Symbols currently tradable against `quote_asset`
    async fn list_tradable_pairs(&self, quote_asset: &str) -> Result<Vec<String>, FetchError>;

    /// The most recent `limit` candles for `symbol`
    async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<OhlcSeries, FetchError>;

    /// Rolling 24h statistics for `symbol`
    async fn get_24h_ticker(&self, symbol: &str) -> Result<Ticker24h, FetchError>;
}
