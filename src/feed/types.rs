//! Exchange data types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while retrieving data for a single symbol
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, decode)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Exchange answered with a non-success status
    #[error("Exchange returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Exchange answered with no data
    #[error("Empty payload")]
    EmptyPayload,
    /// Payload could not be interpreted
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// A single OHLC candle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: DateTime<Utc>,
}

/// Candles for one symbol, strictly ascending by open time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcSeries {
    candles: Vec<Candle>,
}

impl OhlcSeries {
    /// Build a series, rejecting empty or out-of-order input
    pub fn new(candles: Vec<Candle>) -> Result<Self, FetchError> {
        if candles.is_empty() {
            return Err(FetchError::EmptyPayload);
        }
        if candles.windows(2).any(|w| w[0].open_time >= w[1].open_time) {
            return Err(FetchError::InvalidPayload(
                "candles not strictly ascending by open time".to_string(),
            ));
        }
        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Closing prices in time order
    pub fn closes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.close).collect()
    }
}

/// 24-hour rolling ticker statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker24h {
    pub symbol: String,
    pub quote_volume: Decimal,
    pub last_price: Decimal,
    pub price_change_percent: Decimal,
}

/// Kline interval accepted by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    FourHours,
    SixHours,
    EightHours,
    TwelveHours,
    OneDay,
    ThreeDays,
    OneWeek,
    OneMonth,
}

impl Interval {
    /// Wire representation used by the exchange
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::ThreeMinutes => "3m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1h",
            Interval::TwoHours => "2h",
            Interval::FourHours => "4h",
            Interval::SixHours => "6h",
            Interval::EightHours => "8h",
            Interval::TwelveHours => "12h",
            Interval::OneDay => "1d",
            Interval::ThreeDays => "3d",
            Interval::OneWeek => "1w",
            Interval::OneMonth => "1M",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown interval string
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unsupported interval: {0:?}")]
pub struct ParseIntervalError(pub String);

impl FromStr for Interval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let interval = match s {
            "1m" => Interval::OneMinute,
            "3m" => Interval::ThreeMinutes,
            "5m" => Interval::FiveMinutes,
            "15m" => Interval::FifteenMinutes,
            "30m" => Interval::ThirtyMinutes,
            "1h" => Interval::OneHour,
            "2h" => Interval::TwoHours,
            "4h" => Interval::FourHours,
            "6h" => Interval::SixHours,
            "8h" => Interval::EightHours,
            "12h" => Interval::TwelveHours,
            "1d" => Interval::OneDay,
            "3d" => Interval::ThreeDays,
            "1w" => Interval::OneWeek,
            "1M" => Interval::OneMonth,
            other => return Err(ParseIntervalError(other.to_string())),
        };
        Ok(interval)
    }
}

impl TryFrom<String> for Interval {
    type Error = ParseIntervalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.as_str().to_string()
    }
}
