//! Crossover detection on the two most recent values of indicator series
//!
//! Fewer than two values in any input means "no cross", not an error.

use rust_decimal::Decimal;

fn last_two(values: &[Decimal]) -> Option<(Decimal, Decimal)> {
    match values {
        [.., prev, curr] => Some((*prev, *curr)),
        _ => None,
    }
}

/// Fast series crossed above the slow series on the latest bar
pub fn golden_cross(fast: &[Decimal], slow: &[Decimal]) -> bool {
    match (last_two(fast), last_two(slow)) {
        (Some((f_prev, f_curr)), Some((s_prev, s_curr))) => f_prev <= s_prev && f_curr > s_curr,
        _ => false,
    }
}

/// Fast series crossed below the slow series on the latest bar
pub fn death_cross(fast: &[Decimal], slow: &[Decimal]) -> bool {
    match (last_two(fast), last_two(slow)) {
        (Some((f_prev, f_curr)), Some((s_prev, s_curr))) => f_prev >= s_prev && f_curr < s_curr,
        _ => false,
    }
}

/// MACD histogram flipped from negative to positive
pub fn macd_bullish(histogram: &[Decimal]) -> bool {
    last_two(histogram).is_some_and(|(prev, curr)| prev < Decimal::ZERO && curr > Decimal::ZERO)
}

/// MACD histogram flipped from positive to negative
pub fn macd_bearish(histogram: &[Decimal]) -> bool {
    last_two(histogram).is_some_and(|(prev, curr)| prev > Decimal::ZERO && curr < Decimal::ZERO)
}
