//! End-to-end screening pipeline tests

use crate::common::{falling, rising, MockExchange};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use ta_screener::feed::Interval;
use ta_screener::filter::FilterCriteria;
use ta_screener::retrieval::RetrievalConfig;
use ta_screener::scanner::{ScanError, ScanRequest, Screener};

fn no_delay() -> RetrievalConfig {
    RetrievalConfig {
        batch_size: 2,
        inter_request_delay: Duration::ZERO,
        inter_batch_delay: Duration::ZERO,
    }
}

fn request(criteria: FilterCriteria) -> ScanRequest {
    let mut request = ScanRequest::new("USDT", Interval::OneHour, criteria);
    request.limit = 60;
    request
}

#[tokio::test]
async fn test_failed_fetch_is_isolated() {
    let exchange = Arc::new(
        MockExchange::new()
            .with_symbol("AAAUSDT", rising(60))
            .failing("BBBUSDT")
            .with_symbol("CCCUSDT", falling(60)),
    );
    let screener = Screener::new(exchange.clone(), no_delay());

    let report = screener
        .run(&request(FilterCriteria::unconstrained()), None)
        .await
        .unwrap();

    assert_eq!(
        exchange.candle_requests(),
        vec!["AAAUSDT", "BBBUSDT", "CCCUSDT"]
    );
    assert_eq!(report.total_scanned, 2);
    assert_eq!(report.matched_count, 2);
    assert_eq!(report.failed_symbols, vec!["BBBUSDT"]);
    assert!(report.results.iter().all(|r| r.symbol != "BBBUSDT"));
}

#[tokio::test]
async fn test_short_series_counted_but_skipped() {
    let exchange = Arc::new(
        MockExchange::new()
            .with_symbol("NEWUSDT", rising(30))
            .with_symbol("OLDUSDT", rising(60)),
    );
    let screener = Screener::new(exchange, no_delay());

    let report = screener
        .run(&request(FilterCriteria::unconstrained()), None)
        .await
        .unwrap();

    assert_eq!(report.total_scanned, 2);
    assert_eq!(report.matched_count, 1);
    assert_eq!(report.results[0].symbol, "OLDUSDT");
}

#[tokio::test]
async fn test_criteria_filter_and_ranking() {
    let exchange = Arc::new(
        MockExchange::new()
            .with_symbol("UPUSDT", rising(60))
            .with_symbol("DOWNUSDT", falling(60)),
    );
    let screener = Screener::new(exchange, no_delay());
    let oversold = FilterCriteria::from_json(r#"{"rsi": {"below": 30}}"#).unwrap();

    let report = screener.run(&request(oversold), None).await.unwrap();

    assert_eq!(report.total_scanned, 2);
    assert_eq!(report.matched_count, 1);
    let hit = &report.results[0];
    assert_eq!(hit.symbol, "DOWNUSDT");
    assert_eq!(hit.price, dec!(651.9));
    assert_eq!(hit.indicators.rsi, Decimal::ZERO);
    // 50 base + 30 RSI + 10 near lower band
    assert_eq!(hit.score, dec!(90));
}

#[tokio::test]
async fn test_max_results_truncates_after_counting() {
    let exchange = Arc::new(
        MockExchange::new()
            .with_symbol("AUSDT", rising(60))
            .with_symbol("BUSDT", falling(60))
            .with_symbol("CUSDT", rising(70)),
    );
    let screener = Screener::new(exchange, no_delay());
    let mut req = request(FilterCriteria::unconstrained());
    req.max_results = Some(1);

    let report = screener.run(&req, None).await.unwrap();

    assert_eq!(report.matched_count, 3);
    assert_eq!(report.results.len(), 1);
}

#[tokio::test]
async fn test_results_sorted_by_score_descending() {
    let mut chop: Vec<Decimal> = (0..60).map(|i| Decimal::from(100 + i % 2)).collect();
    chop[59] = dec!(100.5);
    let exchange = Arc::new(
        MockExchange::new()
            .with_symbol("CHOPUSDT", chop)
            .with_symbol("DOWNUSDT", falling(60)),
    );
    let screener = Screener::new(exchange, no_delay());

    let report = screener
        .run(&request(FilterCriteria::unconstrained()), None)
        .await
        .unwrap();

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].symbol, "DOWNUSDT");
    assert!(report
        .results
        .windows(2)
        .all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_volume_narrowing() {
    let exchange = Arc::new(
        MockExchange::new()
            .with_symbol("LOWUSDT", rising(60))
            .with_symbol("HIGHUSDT", rising(60))
            .with_symbol("MIDUSDT", rising(60))
            .with_symbol("NOTICKERUSDT", rising(60))
            .with_volume("LOWUSDT", dec!(10))
            .with_volume("HIGHUSDT", dec!(1000000))
            .with_volume("MIDUSDT", dec!(5000)),
    );
    let screener = Screener::new(exchange.clone(), no_delay());
    let mut req = request(FilterCriteria::unconstrained());
    req.top_volume = Some(2);

    let report = screener.run(&req, None).await.unwrap();

    assert_eq!(exchange.candle_requests(), vec!["HIGHUSDT", "MIDUSDT"]);
    assert_eq!(report.total_scanned, 2);
}

#[tokio::test]
async fn test_progress_reported_for_every_symbol() {
    let exchange = Arc::new(
        MockExchange::new()
            .with_symbol("AUSDT", rising(60))
            .failing("BUSDT")
            .with_symbol("CUSDT", rising(60)),
    );
    let screener = Screener::new(exchange, no_delay());
    let seen = Mutex::new(Vec::new());
    let observer = |processed: usize, total: usize, symbol: &str| {
        seen.lock().unwrap().push((processed, total, symbol.to_string()));
    };

    screener
        .run(&request(FilterCriteria::unconstrained()), Some(&observer))
        .await
        .unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[1], (2, 3, "BUSDT".to_string()));
}

#[tokio::test]
async fn test_invalid_parameters_fail_before_network() {
    let exchange = Arc::new(MockExchange::new().with_symbol("AUSDT", rising(60)));
    let screener = Screener::new(exchange.clone(), no_delay());

    let mut bad_limit = request(FilterCriteria::unconstrained());
    bad_limit.limit = 10;
    assert!(matches!(
        screener.run(&bad_limit, None).await,
        Err(ScanError::InvalidParameter(_))
    ));

    let mut bad_criteria = request(FilterCriteria::unconstrained());
    bad_criteria.criteria.price = Some(ta_screener::filter::PriceFilter {
        min: Some(dec!(10)),
        max: Some(dec!(1)),
    });
    assert!(matches!(
        screener.run(&bad_criteria, None).await,
        Err(ScanError::InvalidParameter(_))
    ));

    let zero_batch = Screener::new(
        exchange.clone(),
        RetrievalConfig {
            batch_size: 0,
            ..no_delay()
        },
    );
    assert!(matches!(
        zero_batch
            .run(&request(FilterCriteria::unconstrained()), None)
            .await,
        Err(ScanError::InvalidParameter(_))
    ));

    assert_eq!(exchange.list_requests(), 0);
    assert!(exchange.candle_requests().is_empty());
}

#[tokio::test]
async fn test_empty_universe_is_fatal() {
    let screener = Screener::new(Arc::new(MockExchange::new()), no_delay());

    let result = screener
        .run(&request(FilterCriteria::unconstrained()), None)
        .await;

    assert!(matches!(result, Err(ScanError::NoInstruments(_))));
}

#[tokio::test]
async fn test_no_matches_is_empty_report() {
    let exchange = Arc::new(MockExchange::new().with_symbol("AUSDT", rising(60)));
    let screener = Screener::new(exchange, no_delay());
    let oversold = FilterCriteria::from_json(r#"{"rsi": {"below": 30}}"#).unwrap();

    let report = screener.run(&request(oversold), None).await.unwrap();

    assert_eq!(report.total_scanned, 1);
    assert_eq!(report.matched_count, 0);
    assert!(report.results.is_empty());
}

#[tokio::test]
async fn test_report_serialization_shape() {
    let exchange = Arc::new(MockExchange::new().with_symbol("AUSDT", falling(60)));
    let screener = Screener::new(exchange, no_delay());
    let criteria = FilterCriteria::from_json(r#"{"rsi": {"below": 30}}"#).unwrap();

    let report = screener.run(&request(criteria), None).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["interval"], "1h");
    assert_eq!(json["totalScanned"], 1);
    assert_eq!(json["matchedCount"], 1);
    assert!(json["timestamp"].is_string());
    assert!(json["filters"]["rsi"].is_object());
    assert!(json.get("failedSymbols").is_none());

    let result = &json["results"][0];
    assert_eq!(result["symbol"], "AUSDT");
    for key in ["rsi", "macd", "ma20", "ma50", "bollinger"] {
        assert!(!result["indicators"][key].is_null(), "missing {}", key);
    }
    assert!(result["indicators"]["macd"]["histogram"].is_string());
    assert!(result["crosses"]["goldenCross"].is_boolean());
}

#[tokio::test(start_paused = true)]
async fn test_scan_honours_batch_pacing() {
    let exchange = Arc::new(
        MockExchange::new()
            .with_symbol("AUSDT", rising(60))
            .with_symbol("BUSDT", rising(60))
            .with_symbol("CUSDT", rising(60)),
    );
    let screener = Screener::new(
        exchange,
        RetrievalConfig {
            batch_size: 2,
            inter_request_delay: Duration::from_millis(50),
            inter_batch_delay: Duration::from_secs(2),
        },
    );

    let start = tokio::time::Instant::now();
    screener
        .run(&request(FilterCriteria::unconstrained()), None)
        .await
        .unwrap();

    assert_eq!(start.elapsed(), Duration::from_millis(50 + 2000));
}
