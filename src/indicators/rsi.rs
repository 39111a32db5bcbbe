//! Relative Strength Index with Wilder's smoothing

use super::{require_len, require_period, IndicatorError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// RSI series over `closes`
///
/// Average gain/loss are seeded with the simple mean of the first `period`
/// deltas, then smoothed with `avg = (avg * (period - 1) + x) / period`.
/// Requires `closes.len() >= period + 1`; output length is
/// `closes.len() - period`.
pub fn rsi(closes: &[Decimal], period: usize) -> Result<Vec<Decimal>, IndicatorError> {
    require_period("RSI", period)?;
    require_len("RSI", closes.len(), period + 1)?;

    let period_d = Decimal::from(period);
    let period_m1 = Decimal::from(period - 1);

    let (gains, losses): (Vec<Decimal>, Vec<Decimal>) = closes
        .windows(2)
        .map(|w| {
            let delta = w[1] - w[0];
            if delta > Decimal::ZERO {
                (delta, Decimal::ZERO)
            } else {
                (Decimal::ZERO, -delta)
            }
        })
        .unzip();

    let mut avg_gain = gains[..period].iter().copied().sum::<Decimal>() / period_d;
    let mut avg_loss = losses[..period].iter().copied().sum::<Decimal>() / period_d;

    let mut result = Vec::with_capacity(gains.len() - period + 1);
    result.push(rsi_value(avg_gain, avg_loss));

    for (&gain, &loss) in gains[period..].iter().zip(&losses[period..]) {
        avg_gain = (avg_gain * period_m1 + gain) / period_d;
        avg_loss = (avg_loss * period_m1 + loss) / period_d;
        result.push(rsi_value(avg_gain, avg_loss));
    }

    Ok(result)
}

fn rsi_value(avg_gain: Decimal, avg_loss: Decimal) -> Decimal {
    if avg_loss.is_zero() {
        return dec!(100);
    }
    // Same as 100 - 100 / (1 + gain / loss), without the unbounded ratio
    dec!(100) * avg_gain / (avg_gain + avg_loss)
}
