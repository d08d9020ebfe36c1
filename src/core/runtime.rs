//! Periodic report task
//!
//! Re-runs the engine for one selection on a fixed interval and publishes the
//! rendered text on a channel. A hard engine failure publishes the generic
//! "data unavailable" message instead; the loop keeps going either way.
//! Shutdown is honored between ticks and in the middle of a pass.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::adapters::MarketDataSource;
use crate::core::engine::MarketEngine;
use crate::core::types::{Action, Selection};
use crate::report::{render_gainers, render_pump_dump, DATA_UNAVAILABLE_MESSAGE};

/// Run the engine once for `selection` and render the outcome
pub async fn build_report<S>(engine: &MarketEngine<S>, selection: &Selection) -> String
where
    S: MarketDataSource + ?Sized + 'static,
{
    match engine.fetch(selection).await {
        Ok(instruments) => match selection.action {
            Action::Gainers => render_gainers(&instruments, selection.market, selection.timeframe),
            Action::PumpDump => render_pump_dump(&instruments),
        },
        Err(e) => {
            error!(selection = %selection, error = %e, "[REPORT] Engine call failed");
            DATA_UNAVAILABLE_MESSAGE.to_string()
        }
    }
}

/// Report loop: first report immediately, then one per `period`
///
/// # Arguments
/// * `engine` - Shared aggregation engine
/// * `selection` - What to report
/// * `period` - Delay between two reports
/// * `report_tx` - Sink for rendered reports; the task stops when it is closed
/// * `shutdown_rx` - Broadcast receiver for shutdown signal
pub async fn report_task<S>(
    engine: Arc<MarketEngine<S>>,
    selection: Selection,
    period: Duration,
    report_tx: mpsc::Sender<String>,
    mut shutdown_rx: broadcast::Receiver<()>,
) where
    S: MarketDataSource + ?Sized + 'static,
{
    info!(selection = %selection, period_secs = period.as_secs(), "Report task started");

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut reports_sent: u64 = 0;

    loop {
        tokio::select! {
            // Shutdown takes priority
            biased;
            _ = shutdown_rx.recv() => {
                info!(reports_sent, "Report task shutting down");
                break;
            }
            _ = ticker.tick() => {
                // Shutdown also cancels a pass in progress
                let report = tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => {
                        info!(reports_sent, "Report task shutting down, pass cancelled");
                        break;
                    }
                    report = build_report(&engine, &selection) => report,
                };
                if report_tx.send(report).await.is_err() {
                    info!(reports_sent, "[REPORT] Receiver dropped, stopping report task");
                    break;
                }
                reports_sent += 1;
            }
        }
    }
}
