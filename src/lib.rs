//! ta-screener: technical-indicator screener for exchange trading pairs
//!
//! This library provides the core components for:
//! - Paced, failure-isolated retrieval of OHLC series from Binance
//! - Indicator computation (RSI, SMA/EMA, MACD, Bollinger Bands)
//! - Golden/death cross and MACD flip detection
//! - Composable filter criteria and ranking scores
//! - A screening pipeline producing ranked scan reports

pub mod cli;
pub mod config;
pub mod feed;
pub mod filter;
pub mod indicators;
pub mod retrieval;
pub mod scanner;
pub mod telemetry;
