//! Market Pulse entry point
//!
//! 1. Loads `.env` and the YAML configuration
//! 2. Builds the engine on top of the Binance REST client
//! 3. Runs the periodic report task for the configured selection
//! 4. Writes every rendered report to stdout until Ctrl+C

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use market_pulse::config::{self, constants, logging::init_logging, AppConfig};
use market_pulse::core::{report_task, MarketEngine, Market, Selection};

/// Config file path, overridable through `MARKET_PULSE_CONFIG`
fn config_path() -> PathBuf {
    std::env::var("MARKET_PULSE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.yaml"))
}

/// Selection from config, overridden by `REPORT_MARKET` / `REPORT_SELECTION`
fn resolve_selection(config: &AppConfig) -> anyhow::Result<Selection> {
    let market = match std::env::var("REPORT_MARKET") {
        Ok(raw) => raw.parse::<Market>()?,
        Err(_) => config.report.market,
    };

    match std::env::var("REPORT_SELECTION") {
        Ok(payload) => Ok(Selection::from_payload(&payload, market)?),
        Err(_) => Ok(Selection::new(market, config.report.action, config.report.timeframe)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenvy::dotenv().ok();

    init_logging();

    info!("Market Pulse starting...");

    let path = config_path();
    let config = if path.exists() {
        match config::load_config(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(path = %path.display(), error = %e, "[CONFIG] Configuration failed");
                std::process::exit(1);
            }
        }
    } else {
        warn!(path = %path.display(), "[CONFIG] No configuration file, using defaults");
        AppConfig::default()
    };

    let selection = resolve_selection(&config)?;
    info!(
        selection = %selection,
        quote = %config.engine.quote_suffix,
        concurrency = config.engine.enrichment_concurrency,
        interval_secs = config.report.interval_secs,
        "[CONFIG] Loaded"
    );

    let engine = Arc::new(MarketEngine::from_config(&config));

    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let (report_tx, mut report_rx) = mpsc::channel::<String>(constants::REPORT_CHANNEL_CAPACITY);

    let reporter = tokio::spawn(report_task(
        Arc::clone(&engine),
        selection,
        Duration::from_secs(config.report.interval_secs),
        report_tx,
        shutdown_tx.subscribe(),
    ));

    // Spawn SIGINT handler task
    let shutdown_signal = shutdown_tx.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("[SHUTDOWN] Graceful shutdown initiated");
                let _ = shutdown_signal.send(());
            }
            Err(err) => {
                error!(error = %err, "Failed to listen for Ctrl+C signal");
            }
        }
    });

    // Drains until the report task drops its sender
    while let Some(report) = report_rx.recv().await {
        println!("{}", report);
    }

    if let Err(e) = reporter.await {
        error!(error = %e, "[SHUTDOWN] Report task panicked");
    }

    info!("[SHUTDOWN] Clean exit");
    Ok(())
}
