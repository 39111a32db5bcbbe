//! Moving Average Convergence Divergence

use super::moving_average::ema;
use super::{require_len, require_period, IndicatorError};
use rust_decimal::Decimal;

/// MACD output series
///
/// `line` starts at the first index where the slow EMA is defined;
/// `signal` and `histogram` are aligned to the trailing end of `line`.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub line: Vec<Decimal>,
    pub signal: Vec<Decimal>,
    pub histogram: Vec<Decimal>,
}

/// Compute MACD. Requires `closes.len() >= slow + signal` and `fast < slow`.
pub fn macd(
    closes: &[Decimal],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<Macd, IndicatorError> {
    require_period("MACD", fast)?;
    require_period("MACD", signal)?;
    if slow <= fast {
        return Err(IndicatorError::InvalidPeriod {
            indicator: "MACD",
            period: slow,
        });
    }
    require_len("MACD", closes.len(), slow + signal)?;

    let fast_ema = ema(closes, fast)?;
    let slow_ema = ema(closes, slow)?;

    // fast EMA is defined (slow - fast) bars earlier; drop those so both start together
    let aligned_fast = &fast_ema[slow - fast..];
    let line: Vec<Decimal> = aligned_fast
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema(&line, signal)?;
    let offset = line.len() - signal_line.len();
    let histogram = signal_line
        .iter()
        .enumerate()
        .map(|(i, s)| line[i + offset] - s)
        .collect();

    Ok(Macd {
        line,
        signal: signal_line,
        histogram,
    })
}
