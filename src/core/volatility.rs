//! Volatility range calculator for the pump/dump view
//!
//! Every instrument moving at least `pump_dump_threshold` percent gets its own
//! task (no concurrency ceiling: the filtered subset is small) fetching the
//! lookback window of candles. From the window:
//!
//! - `max_dump = (current - min_low) / current * 100`
//! - `max_pump = (max_high - current) / current * 100`
//!
//! where `current` is the close of the most recent candle. Successful results
//! are appended to a shared vector under a mutex held only for the push.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::Candle;
use crate::adapters::MarketDataSource;
use crate::config::EngineConfig;
use crate::core::ranking::is_mover;
use crate::core::types::{round2, InstrumentSnapshot, Market};

/// Drawdown / run-up of the current price against the lookback window, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityRange {
    pub max_dump: f64,
    pub max_pump: f64,
}

/// Compute the range from a window of candles, oldest first
///
/// A zero running extremum is always replaced by the next observed value, so a
/// candle with a zero high or low cannot pin the ceiling or floor at zero.
pub fn compute_range(symbol: &str, candles: &[Candle]) -> ExchangeResult<VolatilityRange> {
    let Some(last) = candles.last() else {
        return Err(ExchangeError::InsufficientData {
            symbol: symbol.to_string(),
            reason: "no candles returned".to_string(),
        });
    };

    let current = last.close;
    if current == 0.0 {
        return Err(ExchangeError::InsufficientData {
            symbol: symbol.to_string(),
            reason: "current close is zero".to_string(),
        });
    }

    let mut max_price = 0.0_f64;
    let mut min_price = 0.0_f64;
    for candle in candles {
        if max_price == 0.0 || candle.high > max_price {
            max_price = candle.high;
        }
        if min_price == 0.0 || candle.low < min_price {
            min_price = candle.low;
        }
    }

    Ok(VolatilityRange {
        max_dump: round2((current - min_price) / current * 100.0),
        max_pump: round2((max_price - current) / current * 100.0),
    })
}

/// Annotate every mover with its volatility range and drop everything else
///
/// Instruments below the threshold are filtered out before any request. A
/// symbol whose candle fetch or computation fails is logged and dropped.
/// Output order follows task completion.
pub async fn annotate_volatility<S>(
    source: Arc<S>,
    market: Market,
    instruments: Vec<InstrumentSnapshot>,
    config: &EngineConfig,
) -> Vec<InstrumentSnapshot>
where
    S: MarketDataSource + ?Sized + 'static,
{
    let movers: Vec<InstrumentSnapshot> = instruments
        .into_iter()
        .filter(|instrument| is_mover(instrument, config.pump_dump_threshold))
        .collect();
    let candidates = movers.len();

    let results = Arc::new(Mutex::new(Vec::with_capacity(candidates)));
    let mut tasks = JoinSet::new();

    for mut instrument in movers {
        let source = Arc::clone(&source);
        let results = Arc::clone(&results);
        let interval = config.volatility_interval.clone();
        let lookback = config.volatility_lookback;

        tasks.spawn(async move {
            let range = source
                .fetch_candles(market, &instrument.symbol, &interval, lookback)
                .await
                .and_then(|candles| compute_range(&instrument.symbol, &candles));

            match range {
                Ok(range) => {
                    instrument.max_dump = Some(range.max_dump);
                    instrument.max_pump = Some(range.max_pump);
                    results.lock().await.push(instrument);
                }
                Err(e) => {
                    warn!(
                        symbol = %instrument.symbol,
                        error = %e,
                        "[VOLATILITY] Max dump/pump unavailable, symbol dropped"
                    );
                }
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "[VOLATILITY] Volatility task aborted");
        }
    }

    let annotated = match Arc::try_unwrap(results) {
        Ok(mutex) => mutex.into_inner(),
        Err(shared) => std::mem::take(&mut *shared.lock().await),
    };

    info!(
        market = %market,
        threshold = config.pump_dump_threshold,
        candidates,
        annotated = annotated.len(),
        "[VOLATILITY] Volatility ranges computed"
    );

    annotated
}
