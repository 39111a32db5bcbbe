use clap::Parser;
use ta_screener::cli::{Cli, Commands};
use ta_screener::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    ta_screener::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Scan(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            let retrieval = config.retrieval_config();
            println!("Current configuration:");
            println!(
                "  Exchange: {} (quote {}, timeout {}s)",
                config.exchange.base_url, config.exchange.quote_asset, config.exchange.timeout_secs
            );
            println!(
                "  Retrieval: batch={} request_delay={:?} batch_delay={:?}",
                retrieval.batch_size, retrieval.inter_request_delay, retrieval.inter_batch_delay
            );
            println!(
                "  Scan: interval={} limit={} top_volume={:?} max_results={:?}",
                config.scan.interval,
                config.scan.limit,
                config.scan.top_volume,
                config.scan.max_results
            );
            println!("  Log level: {}", config.telemetry.log_level);
        }
    }

    Ok(())
}
