//! Indicator engine
//!
//! Pure functions over ordered price sequences. Every output sequence is
//! aligned to the trailing end of its input: the first value corresponds to
//! the first index where the lookback window is full.

mod bollinger;
mod cross;
mod macd;
mod moving_average;
mod rsi;
mod snapshot;

pub use bollinger::{bollinger_bands, BollingerBands};
pub use cross::{death_cross, golden_cross, macd_bearish, macd_bullish};
pub use macd::{macd, Macd};
pub use moving_average::{ema, sma};
pub use rsi::rsi;
pub use snapshot::{
    BollingerValue, CrossSignals, IndicatorSnapshot, MacdValue, BOLLINGER_K, BOLLINGER_PERIOD,
    MACD_FAST, MACD_SIGNAL, MACD_SLOW, MA_FAST_PERIOD, MA_SLOW_PERIOD, RSI_PERIOD,
};

use thiserror::Error;

/// Indicator computation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndicatorError {
    /// Input shorter than the indicator's lookback
    #[error("{indicator} needs at least {required} values, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },
    /// Zero or otherwise unusable period
    #[error("{indicator}: invalid period {period}")]
    InvalidPeriod {
        indicator: &'static str,
        period: usize,
    },
}

/// Check `len >= required`, reporting in terms of `indicator`
pub(crate) fn require_len(
    indicator: &'static str,
    actual: usize,
    required: usize,
) -> Result<(), IndicatorError> {
    if actual < required {
        return Err(IndicatorError::InsufficientData {
            indicator,
            required,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn require_period(indicator: &'static str, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator, period });
    }
    Ok(())
}
