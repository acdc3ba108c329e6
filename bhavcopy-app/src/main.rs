//! NSE Bhavcopy Watchlist Downloader
//!
//! Asks for a date range, downloads every trading day's bhavcopy from
//! the exchange, merges them into one master CSV and writes the
//! watchlist's rows into a workbook with one sheet per year.

mod pipeline;
mod prompt;
mod writer;

use anyhow::Result;
use bhavcopy_core::PipelineConfig;
use bhavcopy_sources::{BhavcopySource, SourceConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("🚀 Starting NSE Bhavcopy watchlist downloader");

    let config = PipelineConfig::default();
    let source_config = SourceConfig {
        live_cutoff: config.live_cutoff,
        ..SourceConfig::default()
    };
    let source = BhavcopySource::new(&source_config)?;

    let (start, end) = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        prompt::ask_date_range(&mut input, &mut output)?
    };

    let report = pipeline::run(&config, &source, start, end).await?;
    pipeline::log_report(&config, &report);

    Ok(())
}
