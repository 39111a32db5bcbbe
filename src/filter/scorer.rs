//! Ranking score for matched instruments

use crate::indicators::IndicatorSnapshot;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const BASE_SCORE: Decimal = dec!(50);
const RSI_OVERSOLD: Decimal = dec!(30);
const RSI_OVERBOUGHT: Decimal = dec!(70);
const CROSS_BONUS: Decimal = dec!(15);
const BAND_EDGE_BONUS: Decimal = dec!(10);
const BAND_LOWER_EDGE: Decimal = dec!(0.1);
const BAND_UPPER_EDGE: Decimal = dec!(0.9);
const MAX_SCORE: Decimal = dec!(100);

/// Score a snapshot in `[0, 100]`; higher means a stronger setup
///
/// Bonuses are additive: RSI extremity, a fresh MACD bullish flip, a fresh
/// golden cross, and price near either Bollinger band.
pub fn score(snapshot: &IndicatorSnapshot) -> Decimal {
    let mut total = BASE_SCORE;

    if snapshot.rsi < RSI_OVERSOLD {
        total += (RSI_OVERSOLD - snapshot.rsi).max(Decimal::ZERO);
    } else if snapshot.rsi > RSI_OVERBOUGHT {
        total += (snapshot.rsi - RSI_OVERBOUGHT).max(Decimal::ZERO);
    }

    if snapshot.crosses.macd_bullish {
        total += CROSS_BONUS;
    }
    if snapshot.crosses.golden_cross {
        total += CROSS_BONUS;
    }

    // Collapsed bands have no defined position
    if let Some(position) = snapshot.bollinger.position(snapshot.price) {
        if position < BAND_LOWER_EDGE {
            total += BAND_EDGE_BONUS;
        }
        if position > BAND_UPPER_EDGE {
            total += BAND_EDGE_BONUS;
        }
    }

    total.clamp(Decimal::ZERO, MAX_SCORE)
}
