//! Indicator engine, filter and scorer properties over generated series

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use ta_screener::filter::{matches, score, FilterCriteria};
use ta_screener::indicators::{
    bollinger_bands, death_cross, ema, golden_cross, macd, rsi, sma, IndicatorError,
    IndicatorSnapshot,
};

/// Deterministic pseudo-random walk, prices in cents
fn random_walk(seed: u64, len: usize) -> Vec<Decimal> {
    let mut state = seed;
    let mut price: i64 = 10_000;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let step = ((state >> 33) % 201) as i64 - 100;
            price = (price + step).max(100);
            Decimal::new(price, 2)
        })
        .collect()
}

#[test]
fn test_rsi_always_within_bounds() {
    for seed in 0..25 {
        let closes = random_walk(seed, 120);
        let values = rsi(&closes, 14).unwrap();
        assert_eq!(values.len(), 106);
        for v in values {
            assert!(v >= Decimal::ZERO && v <= dec!(100), "seed {} rsi {}", seed, v);
        }
    }
}

#[test]
fn test_rsi_ascending_with_single_dip_then_flat() {
    let mut closes: Vec<Decimal> = (1..=25).map(Decimal::from).collect();
    closes.push(dec!(20));
    closes.extend([dec!(20); 4]);
    assert_eq!(closes.len(), 30);

    let last = *rsi(&closes, 14).unwrap().last().unwrap();
    assert!(last >= Decimal::ZERO && last <= dec!(100));
}

#[test]
fn test_ema_seed_continuity() {
    let closes = random_walk(7, 80);
    for period in [2, 5, 12, 26, 50] {
        assert_eq!(
            ema(&closes, period).unwrap()[0],
            sma(&closes, period).unwrap()[0]
        );
    }
}

#[test]
fn test_macd_length_boundary() {
    let closes = random_walk(3, 35);
    assert!(macd(&closes, 12, 26, 9).is_ok());
    assert_eq!(
        macd(&closes[..34], 12, 26, 9),
        Err(IndicatorError::InsufficientData {
            indicator: "MACD",
            required: 35,
            actual: 34
        })
    );
}

#[test]
fn test_macd_histogram_exact() {
    for seed in 0..10 {
        let result = macd(&random_walk(seed, 150), 12, 26, 9).unwrap();
        let offset = result.line.len() - result.signal.len();
        for (i, h) in result.histogram.iter().enumerate() {
            assert_eq!(*h, result.line[i + offset] - result.signal[i]);
        }
    }
}

#[test]
fn test_bollinger_band_ordering() {
    for seed in 0..10 {
        let bands = bollinger_bands(&random_walk(seed, 100), 20, dec!(2)).unwrap();
        for i in 0..bands.middle.len() {
            assert!(bands.lower[i] <= bands.middle[i]);
            assert!(bands.middle[i] <= bands.upper[i]);
        }
    }
}

#[test]
fn test_crosses_never_both_fire() {
    for seed in 0..25 {
        let closes = random_walk(seed, 200);
        for end in 50..=closes.len() {
            let window = &closes[..end];
            let fast = sma(window, 20).unwrap();
            let slow = sma(window, 50).unwrap();
            assert!(!(golden_cross(&fast, &slow) && death_cross(&fast, &slow)));
        }
    }
}

#[test]
fn test_snapshot_filter_and_score_over_random_series() {
    let empty = FilterCriteria::unconstrained();
    for seed in 0..25 {
        let snapshot = IndicatorSnapshot::from_closes(&random_walk(seed, 100)).unwrap();
        assert!(matches(&snapshot, &empty));
        let s = score(&snapshot);
        assert!(s >= Decimal::ZERO && s <= dec!(100));
    }
}

#[test]
fn test_rsi_below_boundary_on_snapshot() {
    let mut snapshot = IndicatorSnapshot::from_closes(&random_walk(1, 60)).unwrap();
    let below_30 = FilterCriteria::from_json(r#"{"rsi": {"below": 30}}"#).unwrap();

    snapshot.rsi = dec!(28.5);
    assert!(matches(&snapshot, &below_30));
    snapshot.rsi = dec!(30.0);
    assert!(!matches(&snapshot, &below_30));
}
