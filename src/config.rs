//! Configuration types for ta-screener

use crate::feed::{BinanceConfig, Interval};
use crate::retrieval::RetrievalConfig;
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub retrieval: RetrievalSettings,
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Exchange connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// REST base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Quote asset that defines the instrument universe
    #[serde(default = "default_quote_asset")]
    pub quote_asset: String,
}

fn default_base_url() -> String {
    crate::feed::BINANCE_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_quote_asset() -> String {
    "USDT".to_string()
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            quote_asset: default_quote_asset(),
        }
    }
}

impl ExchangeConfig {
    /// Client configuration for the Binance REST client
    pub fn client_config(&self) -> BinanceConfig {
        BinanceConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Request pacing, in milliseconds as written in the file
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    /// Symbols per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Delay between requests within a batch (milliseconds)
    #[serde(default = "default_inter_request_delay_ms")]
    pub inter_request_delay_ms: u64,

    /// Delay between batches (milliseconds)
    #[serde(default = "default_inter_batch_delay_ms")]
    pub inter_batch_delay_ms: u64,
}

fn default_batch_size() -> usize {
    10
}
fn default_inter_request_delay_ms() -> u64 {
    100
}
fn default_inter_batch_delay_ms() -> u64 {
    1000
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            inter_request_delay_ms: default_inter_request_delay_ms(),
            inter_batch_delay_ms: default_inter_batch_delay_ms(),
        }
    }
}

impl From<&RetrievalSettings> for RetrievalConfig {
    fn from(settings: &RetrievalSettings) -> Self {
        Self {
            batch_size: settings.batch_size,
            inter_request_delay: Duration::from_millis(settings.inter_request_delay_ms),
            inter_batch_delay: Duration::from_millis(settings.inter_batch_delay_ms),
        }
    }
}

/// Default scan parameters, overridable from the command line
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSettings {
    /// Kline interval
    #[serde(default = "default_interval")]
    pub interval: Interval,

    /// Candles per symbol
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Keep only the K most traded symbols before fetching candles
    #[serde(default)]
    pub top_volume: Option<usize>,

    /// Truncate the ranked results
    #[serde(default)]
    pub max_results: Option<usize>,
}

fn default_interval() -> Interval {
    Interval::OneHour
}
fn default_limit() -> usize {
    100
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            limit: default_limit(),
            top_volume: None,
            max_results: None,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Pacing for the retrieval orchestrator
    pub fn retrieval_config(&self) -> RetrievalConfig {
        RetrievalConfig::from(&self.retrieval)
    }
}
