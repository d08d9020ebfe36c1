//! Change enrichment: recompute each instrument's change over a sub-daily window
//!
//! The upstream snapshot only carries a rolling 24h change, so for shorter
//! timeframes every instrument gets its change recomputed from its two most
//! recent candles. One task per instrument, admission gated by a semaphore so
//! that at most `concurrency` kline requests are in flight. Every task is
//! joined before the stage returns.
//!
//! Failures are per-symbol: the symbol is logged and left out of the output,
//! the stage itself never fails. Output order follows task completion.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::Candle;
use crate::adapters::MarketDataSource;
use crate::config::constants::CHANGE_WINDOW_CANDLES;
use crate::core::types::{round2, InstrumentSnapshot, Market};

/// Recompute `price_change_percent` for every instrument from `interval` candles
pub async fn enrich_changes<S>(
    source: Arc<S>,
    market: Market,
    interval: &str,
    instruments: Vec<InstrumentSnapshot>,
    concurrency: usize,
) -> Vec<InstrumentSnapshot>
where
    S: MarketDataSource + ?Sized + 'static,
{
    let requested = instruments.len();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for mut instrument in instruments {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let interval = interval.to_string();

        tasks.spawn(async move {
            // The semaphore is never closed, so acquisition only fails on a bug
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    let reason =
                        ExchangeError::ConnectionFailed(format!("permit unavailable: {}", e));
                    return Err((instrument.symbol, reason));
                }
            };

            let outcome = source
                .fetch_candles(market, &instrument.symbol, &interval, CHANGE_WINDOW_CANDLES)
                .await
                .and_then(|candles| change_from_candles(&instrument.symbol, &candles));

            match outcome {
                Ok(change) => {
                    instrument.set_change(change);
                    Ok(instrument)
                }
                Err(e) => Err((instrument.symbol, e)),
            }
        });
    }

    let mut enriched = Vec::with_capacity(requested);
    let mut failures: Vec<(String, ExchangeError)> = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(instrument)) => enriched.push(instrument),
            Ok(Err(failure)) => failures.push(failure),
            Err(e) => error!(error = %e, "[ENRICH] Enrichment task aborted"),
        }
    }

    for (symbol, reason) in &failures {
        warn!(symbol = %symbol, interval = %interval, error = %reason, "[ENRICH] Symbol dropped");
    }

    info!(
        market = %market,
        interval = %interval,
        requested,
        enriched = enriched.len(),
        dropped = requested - enriched.len(),
        concurrency,
        "[ENRICH] Change enrichment complete"
    );

    enriched
}

/// Close-to-close percent change between the last two candles, rounded to 2 decimals
pub fn change_from_candles(symbol: &str, candles: &[Candle]) -> ExchangeResult<f64> {
    let [.., previous, latest] = candles else {
        return Err(ExchangeError::InsufficientData {
            symbol: symbol.to_string(),
            reason: format!("{} candles returned, need 2", candles.len()),
        });
    };

    if previous.close == 0.0 {
        return Err(ExchangeError::InsufficientData {
            symbol: symbol.to_string(),
            reason: "previous close is zero".to_string(),
        });
    }

    Ok(round2((latest.close - previous.close) / previous.close * 100.0))
}
