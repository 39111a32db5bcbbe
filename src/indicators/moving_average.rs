//! Simple and exponential moving averages

use super::{require_len, require_period, IndicatorError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Simple moving average over each trailing window of `period` values
///
/// Output length is `values.len() - period + 1`.
pub fn sma(values: &[Decimal], period: usize) -> Result<Vec<Decimal>, IndicatorError> {
    require_period("SMA", period)?;
    require_len("SMA", values.len(), period)?;

    let period_d = Decimal::from(period);
    let mut sum: Decimal = values[..period].iter().copied().sum();
    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(sum / period_d);

    // Slide the window rather than re-summing it
    for i in period..values.len() {
        sum += values[i] - values[i - period];
        result.push(sum / period_d);
    }

    Ok(result)
}

/// Exponential moving average seeded with the SMA of the first `period` values
///
/// Multiplier is `2 / (period + 1)`. Output length is `values.len() - period + 1`.
pub fn ema(values: &[Decimal], period: usize) -> Result<Vec<Decimal>, IndicatorError> {
    require_period("EMA", period)?;
    require_len("EMA", values.len(), period)?;

    let multiplier = dec!(2) / Decimal::from(period + 1);
    let seed = values[..period].iter().copied().sum::<Decimal>() / Decimal::from(period);

    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for &value in &values[period..] {
        prev = (value - prev) * multiplier + prev;
        result.push(prev);
    }

    Ok(result)
}
