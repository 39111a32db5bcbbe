//! Scan command implementation

use crate::config::Config;
use crate::feed::{BinanceClient, Interval};
use crate::filter::FilterCriteria;
use crate::scanner::{ScanError, ScanReport, ScanRequest, Screener};
use clap::{Args, ValueEnum};
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Kline interval (1m, 5m, 15m, 1h, 4h, 1d, ...)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// Candles per symbol
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Quote asset defining the universe (e.g. USDT)
    #[arg(short, long)]
    pub quote: Option<String>,

    /// Only scan the N pairs with the highest 24h quote volume
    #[arg(long)]
    pub top: Option<usize>,

    /// Maximum number of ranked results to show
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Filter criteria as JSON, e.g. '{"rsi":{"below":30}}'
    #[arg(short, long, conflicts_with = "filters_file")]
    pub filters: Option<String>,

    /// Read filter criteria JSON from a file
    #[arg(long)]
    pub filters_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let criteria_text = match &self.filters_file {
            Some(path) => Some(std::fs::read_to_string(path)?),
            None => self.filters.clone(),
        };
        let request = self.build_request(config, criteria_text.as_deref())?;

        let client = BinanceClient::with_config(config.exchange.client_config())?;
        let screener = Screener::new(Arc::new(client), config.retrieval_config());

        tracing::info!(
            interval = %request.interval,
            limit = request.limit,
            quote_asset = %request.quote_asset,
            "Starting scan"
        );

        let progress = |processed: usize, total: usize, symbol: &str| {
            tracing::debug!(processed, total, symbol, "Fetched");
            if processed % 25 == 0 || processed == total {
                tracing::info!(processed, total, "Scan progress");
            }
        };
        let report = screener.run(&request, Some(&progress)).await?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => print!("{}", render_table(&report)),
        }

        Ok(())
    }

    /// Merge command-line overrides onto the configured scan defaults
    pub fn build_request(
        &self,
        config: &Config,
        criteria: Option<&str>,
    ) -> Result<ScanRequest, ScanError> {
        let interval = match &self.interval {
            Some(raw) => raw.parse::<Interval>()?,
            None => config.scan.interval,
        };
        let criteria = match criteria {
            Some(text) => FilterCriteria::from_json(text)?,
            None => FilterCriteria::unconstrained(),
        };

        let request = ScanRequest {
            quote_asset: self
                .quote
                .clone()
                .unwrap_or_else(|| config.exchange.quote_asset.clone()),
            interval,
            limit: self.limit.unwrap_or(config.scan.limit),
            top_volume: self.top.or(config.scan.top_volume),
            max_results: self.max_results.or(config.scan.max_results),
            criteria,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Fixed-width table of ranked results
pub fn render_table(report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Scan {} | interval {} | scanned {} | matched {}",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        report.interval,
        report.total_scanned,
        report.matched_count
    );
    let _ = writeln!(
        out,
        "{:<14} {:>14} {:>7} {:>12} {:>14} {:>14} {:>6}  {}",
        "SYMBOL", "PRICE", "RSI", "MACD HIST", "MA20", "MA50", "SCORE", "SIGNALS"
    );

    for r in &report.results {
        let mut signals = Vec::new();
        if r.crosses.golden_cross {
            signals.push("golden");
        }
        if r.crosses.death_cross {
            signals.push("death");
        }
        if r.crosses.macd_bullish {
            signals.push("macd+");
        }
        if r.crosses.macd_bearish {
            signals.push("macd-");
        }

        let _ = writeln!(
            out,
            "{:<14} {:>14} {:>7} {:>12} {:>14} {:>14} {:>6}  {}",
            r.symbol,
            r.price.normalize(),
            r.indicators.rsi.round_dp(2),
            r.indicators.macd.histogram.round_dp(6),
            r.indicators.ma20.round_dp(6).normalize(),
            r.indicators.ma50.round_dp(6).normalize(),
            r.score.round_dp(1),
            signals.join(",")
        );
    }

    if !report.failed_symbols.is_empty() {
        let _ = writeln!(out, "Failed to fetch: {}", report.failed_symbols.join(", "));
    }

    out
}
