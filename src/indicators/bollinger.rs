//! Bollinger Bands

use super::moving_average::sma;
use super::IndicatorError;
use rust_decimal::{Decimal, MathematicalOps};

/// Band series, each aligned to the trailing end of the input
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<Decimal>,
    pub middle: Vec<Decimal>,
    pub lower: Vec<Decimal>,
}

/// SMA-centred bands at `k` population standard deviations
pub fn bollinger_bands(
    prices: &[Decimal],
    period: usize,
    k: Decimal,
) -> Result<BollingerBands, IndicatorError> {
    let middle = sma(prices, period)?;
    let period_d = Decimal::from(period);

    let mut upper = Vec::with_capacity(middle.len());
    let mut lower = Vec::with_capacity(middle.len());

    for (window, &mean) in prices.windows(period).zip(&middle) {
        // Population variance: divide by period, not period - 1
        let variance = window
            .iter()
            .map(|&p| {
                let diff = p - mean;
                diff * diff
            })
            .sum::<Decimal>()
            / period_d;
        let std_dev = variance.sqrt().unwrap_or(Decimal::ZERO);

        upper.push(mean + k * std_dev);
        lower.push(mean - k * std_dev);
    }

    Ok(BollingerBands {
        upper,
        middle,
        lower,
    })
}
