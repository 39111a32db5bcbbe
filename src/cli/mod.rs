//! CLI interface for ta-screener
//!
//! Provides subcommands for:
//! - `scan`: Screen trading pairs against indicator filters
//! - `config`: Show the effective configuration

mod scan;

pub use scan::{OutputFormat, ScanArgs};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ta-screener")]
#[command(about = "Screen exchange trading pairs by technical indicators")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan trading pairs and rank matches
    Scan(ScanArgs),
    /// Show the effective configuration
    Config,
}
