//! Binance spot REST client

use super::{Candle, ExchangeDataSource, FetchError, Interval, OhlcSeries, Ticker24h};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

/// Binance spot REST base URL
pub const BINANCE_API_URL: &str = "https://api.binance.com";

/// Configuration for the Binance REST client
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// Base URL for the REST API
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: BINANCE_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// `/api/v3/exchangeInfo` response, trimmed to what we read
#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SymbolInfo {
    symbol: String,
    status: String,
    quote_asset: String,
}

/// `/api/v3/ticker/24hr` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TickerResponse {
    symbol: String,
    quote_volume: String,
    last_price: String,
    price_change_percent: String,
}

/// REST client for Binance spot market data
pub struct BinanceClient {
    config: BinanceConfig,
    client: Client,
}

impl BinanceClient {
    /// Create a client with custom configuration
    pub fn with_config(config: BinanceConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Create a client against the public endpoint
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(BinanceConfig::default())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ExchangeDataSource for BinanceClient {
    async fn list_tradable_pairs(&self, quote_asset: &str) -> Result<Vec<String>, FetchError> {
        tracing::debug!(quote_asset, "Fetching exchange info");
        let info: ExchangeInfo = self.get_json("/api/v3/exchangeInfo", &[]).await?;
        Ok(tradable_symbols(info, quote_asset))
    }

    async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<OhlcSeries, FetchError> {
        let rows: Vec<Vec<Value>> = self
            .get_json(
                "/api/v3/klines",
                &[
                    ("symbol", symbol.to_string()),
                    ("interval", interval.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        OhlcSeries::new(parse_klines(&rows)?)
    }

    async fn get_24h_ticker(&self, symbol: &str) -> Result<Ticker24h, FetchError> {
        let ticker: TickerResponse = self
            .get_json("/api/v3/ticker/24hr", &[("symbol", symbol.to_string())])
            .await?;
        parse_ticker(ticker)
    }
}

/// Symbols currently trading against the given quote asset
fn tradable_symbols(info: ExchangeInfo, quote_asset: &str) -> Vec<String> {
    info.symbols
        .into_iter()
        .filter(|s| s.status == "TRADING" && s.quote_asset.eq_ignore_ascii_case(quote_asset))
        .map(|s| s.symbol)
        .collect()
}

/// Parse kline rows: `[openTime, open, high, low, close, volume, closeTime, ...]`
fn parse_klines(rows: &[Vec<Value>]) -> Result<Vec<Candle>, FetchError> {
    if rows.is_empty() {
        return Err(FetchError::EmptyPayload);
    }

    rows.iter().map(|row| parse_kline_row(row)).collect()
}

fn parse_kline_row(row: &[Value]) -> Result<Candle, FetchError> {
    if row.len() < 7 {
        return Err(FetchError::InvalidPayload(format!(
            "kline row has {} fields, expected at least 7",
            row.len()
        )));
    }

    Ok(Candle {
        open_time: parse_millis(&row[0])?,
        open: parse_decimal(&row[1])?,
        high: parse_decimal(&row[2])?,
        low: parse_decimal(&row[3])?,
        close: parse_decimal(&row[4])?,
        volume: parse_decimal(&row[5])?,
        close_time: parse_millis(&row[6])?,
    })
}

fn parse_millis(value: &Value) -> Result<DateTime<Utc>, FetchError> {
    value
        .as_i64()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .ok_or_else(|| FetchError::InvalidPayload(format!("bad timestamp: {}", value)))
}

/// Binance sends prices as strings; accept bare numbers too
fn parse_decimal(value: &Value) -> Result<Decimal, FetchError> {
    let parsed = match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    };
    parsed.ok_or_else(|| FetchError::InvalidPayload(format!("bad decimal: {}", value)))
}

fn parse_ticker(ticker: TickerResponse) -> Result<Ticker24h, FetchError> {
    let field = |name: &str, raw: &str| {
        Decimal::from_str(raw)
            .map_err(|e| FetchError::InvalidPayload(format!("{}: {}", name, e)))
    };

    Ok(Ticker24h {
        quote_volume: field("quoteVolume", &ticker.quote_volume)?,
        last_price: field("lastPrice", &ticker.last_price)?,
        price_change_percent: field("priceChangePercent", &ticker.price_change_percent)?,
        symbol: ticker.symbol,
    })
}
