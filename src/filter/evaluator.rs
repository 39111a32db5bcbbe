//! Filter predicate evaluation

use super::criteria::{
    BollingerFilter, FilterCriteria, MaFilter, MaPeriod, MacdFilter, PriceFilter, RsiFilter,
};
use crate::indicators::IndicatorSnapshot;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tolerance for "touching" a band
const TOUCH_UPPER_FACTOR: Decimal = dec!(0.995);
const TOUCH_LOWER_FACTOR: Decimal = dec!(1.005);
/// Bandwidth threshold between narrow and wide bands; both match at exactly this value
const BANDWIDTH_THRESHOLD: Decimal = dec!(0.1);

/// True when `snapshot` satisfies every present category in `criteria`
pub fn matches(snapshot: &IndicatorSnapshot, criteria: &FilterCriteria) -> bool {
    criteria.rsi.as_ref().map_or(true, |f| rsi_matches(snapshot, f))
        && criteria.macd.as_ref().map_or(true, |f| macd_matches(snapshot, f))
        && criteria.ma.as_ref().map_or(true, |f| ma_matches(snapshot, f))
        && criteria
            .bollinger
            .as_ref()
            .map_or(true, |f| bollinger_matches(snapshot, f))
        && criteria.price.as_ref().map_or(true, |f| price_matches(snapshot, f))
}

fn rsi_matches(snapshot: &IndicatorSnapshot, filter: &RsiFilter) -> bool {
    let rsi = snapshot.rsi;
    filter.below.map_or(true, |v| rsi < v)
        && filter.above.map_or(true, |v| rsi > v)
        && filter
            .between
            .map_or(true, |range| range.min <= rsi && rsi <= range.max)
}

fn macd_matches(snapshot: &IndicatorSnapshot, filter: &MacdFilter) -> bool {
    (!filter.bullish || snapshot.crosses.macd_bullish)
        && (!filter.bearish || snapshot.crosses.macd_bearish)
        && filter
            .histogram_positive
            .map_or(true, |flag| (snapshot.macd.histogram > Decimal::ZERO) == flag)
}

fn ma_matches(snapshot: &IndicatorSnapshot, filter: &MaFilter) -> bool {
    let ma = |period: MaPeriod| match period {
        MaPeriod::Twenty => snapshot.ma20,
        MaPeriod::Fifty => snapshot.ma50,
    };

    (!filter.golden_cross || snapshot.crosses.golden_cross)
        && (!filter.death_cross || snapshot.crosses.death_cross)
        && filter.above.map_or(true, |p| snapshot.price > ma(p))
        && filter.below.map_or(true, |p| snapshot.price < ma(p))
}

fn bollinger_matches(snapshot: &IndicatorSnapshot, filter: &BollingerFilter) -> bool {
    let price = snapshot.price;
    let bands = &snapshot.bollinger;
    let bandwidth = bands.bandwidth();

    (!filter.touch_upper || price >= bands.upper * TOUCH_UPPER_FACTOR)
        && (!filter.touch_lower || price <= bands.lower * TOUCH_LOWER_FACTOR)
        && (!filter.below_lower || price < bands.lower)
        && (!filter.above_upper || price > bands.upper)
        && (!filter.narrow || bandwidth <= BANDWIDTH_THRESHOLD)
        && (!filter.wide || bandwidth >= BANDWIDTH_THRESHOLD)
}

fn price_matches(snapshot: &IndicatorSnapshot, filter: &PriceFilter) -> bool {
    filter.min.map_or(true, |v| snapshot.price >= v)
        && filter.max.map_or(true, |v| snapshot.price <= v)
}
