//! Per-instrument indicator snapshot

use super::{
    bollinger_bands, death_cross, golden_cross, macd, macd_bearish, macd_bullish, rsi, sma,
    IndicatorError,
};
use crate::feed::OhlcSeries;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const MA_FAST_PERIOD: usize = 20;
pub const MA_SLOW_PERIOD: usize = 50;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_K: Decimal = dec!(2);

/// Latest MACD values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub value: Decimal,
    pub signal: Decimal,
    pub histogram: Decimal,
}

/// Latest Bollinger band values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerValue {
    pub upper: Decimal,
    pub middle: Decimal,
    pub lower: Decimal,
}

impl BollingerValue {
    /// `(upper - lower) / middle`; zero when the middle band is zero
    pub fn bandwidth(&self) -> Decimal {
        if self.middle.is_zero() {
            return Decimal::ZERO;
        }
        (self.upper - self.lower) / self.middle
    }

    /// Where `price` sits between the bands (0 = lower, 1 = upper)
    ///
    /// `None` when the bands have collapsed to a single value.
    pub fn position(&self, price: Decimal) -> Option<Decimal> {
        let width = self.upper - self.lower;
        if width.is_zero() {
            return None;
        }
        Some((price - self.lower) / width)
    }
}

/// Crossovers observed on the latest bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossSignals {
    pub golden_cross: bool,
    pub death_cross: bool,
    pub macd_bullish: bool,
    pub macd_bearish: bool,
}

/// Latest indicator values for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Latest close
    pub price: Decimal,
    pub rsi: Decimal,
    pub macd: MacdValue,
    pub ma20: Decimal,
    pub ma50: Decimal,
    pub bollinger: BollingerValue,
    pub crosses: CrossSignals,
}

impl IndicatorSnapshot {
    /// Compute the standard indicator set over a candle series
    pub fn from_series(series: &OhlcSeries) -> Result<Self, IndicatorError> {
        Self::from_closes(&series.closes())
    }

    /// Compute the standard indicator set over closing prices
    ///
    /// Cross flags need full series, so every indicator is computed over the
    /// whole history before taking the latest values.
    pub fn from_closes(closes: &[Decimal]) -> Result<Self, IndicatorError> {
        let rsi_series = rsi(closes, RSI_PERIOD)?;
        let macd_series = macd(closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL)?;
        let ma20 = sma(closes, MA_FAST_PERIOD)?;
        let ma50 = sma(closes, MA_SLOW_PERIOD)?;
        let bands = bollinger_bands(closes, BOLLINGER_PERIOD, BOLLINGER_K)?;

        let crosses = CrossSignals {
            golden_cross: golden_cross(&ma20, &ma50),
            death_cross: death_cross(&ma20, &ma50),
            macd_bullish: macd_bullish(&macd_series.histogram),
            macd_bearish: macd_bearish(&macd_series.histogram),
        };

        // Every series above is non-empty once its length check has passed
        let last = |values: &[Decimal]| values.last().copied().unwrap_or_default();

        Ok(Self {
            price: last(closes),
            rsi: last(&rsi_series),
            macd: MacdValue {
                value: last(&macd_series.line),
                signal: last(&macd_series.signal),
                histogram: last(&macd_series.histogram),
            },
            ma20: last(&ma20),
            ma50: last(&ma50),
            bollinger: BollingerValue {
                upper: last(&bands.upper),
                middle: last(&bands.middle),
                lower: last(&bands.lower),
            },
            crosses,
        })
    }
}
