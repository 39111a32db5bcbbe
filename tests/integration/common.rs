//! In-memory exchange for integration tests

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use ta_screener::feed::{
    Candle, ExchangeDataSource, FetchError, Interval, OhlcSeries, Ticker24h,
};

#[derive(Default)]
pub struct MockExchange {
    pub closes: HashMap<String, Vec<Decimal>>,
    pub volumes: HashMap<String, Decimal>,
    pub failing: HashSet<String>,
    pub order: Vec<String>,
    pub candle_requests: Mutex<Vec<String>>,
    pub list_requests: Mutex<usize>,
}

impl MockExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbol(mut self, symbol: &str, closes: Vec<Decimal>) -> Self {
        self.order.push(symbol.to_string());
        self.closes.insert(symbol.to_string(), closes);
        self
    }

    pub fn with_volume(mut self, symbol: &str, volume: Decimal) -> Self {
        self.volumes.insert(symbol.to_string(), volume);
        self
    }

    pub fn failing(mut self, symbol: &str) -> Self {
        if !self.order.iter().any(|s| s == symbol) {
            self.order.push(symbol.to_string());
        }
        self.failing.insert(symbol.to_string());
        self
    }

    pub fn candle_requests(&self) -> Vec<String> {
        self.candle_requests.lock().unwrap().clone()
    }

    pub fn list_requests(&self) -> usize {
        *self.list_requests.lock().unwrap()
    }
}

pub fn series_from(closes: &[Decimal]) -> OhlcSeries {
    let start = Utc.timestamp_opt(1_704_067_200, 0).unwrap();
    let candles = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open_time = start + Duration::hours(i as i64);
            Candle {
                open_time,
                open: close,
                high: close,
                low: close,
                close,
                volume: Decimal::ONE,
                close_time: open_time + Duration::minutes(59),
            }
        })
        .collect();
    OhlcSeries::new(candles).unwrap()
}

pub fn rising(len: usize) -> Vec<Decimal> {
    (0..len).map(|i| Decimal::from(100 + i)).collect()
}

/// Accelerating decline: RSI pinned at 0, price hugging the lower band
pub fn falling(len: usize) -> Vec<Decimal> {
    (0..len)
        .map(|i| Decimal::from(1000) - Decimal::from(i * i) / Decimal::from(10))
        .collect()
}

#[async_trait]
impl ExchangeDataSource for MockExchange {
    async fn list_tradable_pairs(&self, _quote_asset: &str) -> Result<Vec<String>, FetchError> {
        *self.list_requests.lock().unwrap() += 1;
        Ok(self.order.clone())
    }

    async fn get_candles(
        &self,
        symbol: &str,
        _interval: Interval,
        limit: usize,
    ) -> Result<OhlcSeries, FetchError> {
        self.candle_requests.lock().unwrap().push(symbol.to_string());
        if self.failing.contains(symbol) {
            return Err(FetchError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        let closes = self.closes.get(symbol).ok_or(FetchError::EmptyPayload)?;
        let start = closes.len().saturating_sub(limit);
        Ok(series_from(&closes[start..]))
    }

    async fn get_24h_ticker(&self, symbol: &str) -> Result<Ticker24h, FetchError> {
        let quote_volume = *self.volumes.get(symbol).ok_or(FetchError::EmptyPayload)?;
        Ok(Ticker24h {
            symbol: symbol.to_string(),
            quote_volume,
            last_price: Decimal::ONE,
            price_change_percent: Decimal::ZERO,
        })
    }
}
