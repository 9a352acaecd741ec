// =============================================================================
// Meridian Breakout Screener — Main Entry Point
// =============================================================================
//
// Reads a ticker list and a directory of daily bar files, screens every
// ticker for the breakout signal, and emits the aggregated report as JSON
// on stdout.  Acquisition and presentation stay behind their seams: the
// engine itself only sees validated series and returns result records.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod classifier;
mod indicators;
mod market_data;
mod runtime_config;
mod screener;
mod types;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::market_data::FileBarSource;
use crate::runtime_config::ScreenerConfig;

const CONFIG_PATH: &str = "screener_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        Meridian Breakout Screener — Starting             ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let mut config = ScreenerConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, writing defaults");
        let config = ScreenerConfig::default();
        if let Err(e) = config.save(CONFIG_PATH) {
            warn!(error = %e, "Failed to write default config");
        }
        config
    });

    // Override tickers / data dir from env if available.
    if let Ok(ticks) = std::env::var("MERIDIAN_TICKERS") {
        config.tickers = ticks
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if config.tickers.is_empty() {
        config.tickers = ScreenerConfig::default().tickers;
    }
    if let Ok(dir) = std::env::var("MERIDIAN_DATA_DIR") {
        config.data_dir = dir;
    }

    info!(
        tickers = ?config.tickers,
        data_dir = %config.data_dir,
        max_concurrent = config.max_concurrent,
        "screener configured"
    );

    // ── 2. Run the batch ─────────────────────────────────────────────────
    let source = FileBarSource::new(&config.data_dir);
    let report = screener::run_screen(
        &source,
        &config.tickers,
        config.max_concurrent,
        config.min_history,
    )
    .await;

    // ── 3. Report ────────────────────────────────────────────────────────
    let breakouts = report.breakouts();
    info!(
        screened = report.results.len(),
        breakouts = breakouts.len(),
        skipped = report.skipped.len(),
        "screen complete"
    );
    for result in &breakouts {
        info!(ticker = %result.ticker, close = result.close_price, "breakout");
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
