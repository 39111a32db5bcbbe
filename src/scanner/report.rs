//! Scan results and report

use crate::feed::Interval;
use crate::filter::FilterCriteria;
use crate::indicators::{BollingerValue, CrossSignals, IndicatorSnapshot, MacdValue};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Indicator values as published in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSummary {
    pub rsi: Decimal,
    pub macd: MacdValue,
    pub ma20: Decimal,
    pub ma50: Decimal,
    pub bollinger: BollingerValue,
}

/// One instrument that satisfied the criteria
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub symbol: String,
    pub price: Decimal,
    pub indicators: IndicatorSummary,
    pub crosses: CrossSignals,
    pub score: Decimal,
}

impl ScanResult {
    pub fn new(symbol: impl Into<String>, snapshot: IndicatorSnapshot, score: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            price: snapshot.price,
            indicators: IndicatorSummary {
                rsi: snapshot.rsi,
                macd: snapshot.macd,
                ma20: snapshot.ma20,
                ma50: snapshot.ma50,
                bollinger: snapshot.bollinger,
            },
            crosses: snapshot.crosses,
            score,
        }
    }
}

/// Outcome of one screening run, results ordered by descending score
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub timestamp: DateTime<Utc>,
    pub interval: Interval,
    pub filters: FilterCriteria,
    pub results: Vec<ScanResult>,
    /// Series that reached indicator analysis, including ones too short to analyse
    pub total_scanned: usize,
    /// Matches before any truncation of `results`
    pub matched_count: usize,
    /// Symbols whose data could not be retrieved
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_symbols: Vec<String>,
}
