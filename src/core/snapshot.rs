//! Snapshot fetcher: market-wide ticker list filtered to the quote asset
//!
//! For sub-daily timeframes the filtered list is handed to the change
//! enrichment stage; for `24h` the native rolling change is kept verbatim.

use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::types::TickerEntry;
use crate::adapters::MarketDataSource;
use crate::config::EngineConfig;
use crate::core::enrichment::enrich_changes;
use crate::core::types::{InstrumentSnapshot, Market, Timeframe};
use crate::error::Result;

/// Fetch the ticker snapshot for `market` and bring every change figure to `timeframe`
///
/// # Errors
/// Transport and decode failures of the snapshot call itself abort the whole
/// operation. Per-symbol enrichment failures never do.
pub async fn fetch_snapshot<S>(
    source: &Arc<S>,
    config: &EngineConfig,
    market: Market,
    timeframe: Timeframe,
) -> Result<Vec<InstrumentSnapshot>>
where
    S: MarketDataSource + ?Sized + 'static,
{
    let entries = source.fetch_tickers(market).await?;
    let total = entries.len();
    let instruments = filter_quote_suffix(&entries, &config.quote_suffix);

    info!(
        market = %market,
        timeframe = %timeframe,
        total,
        kept = instruments.len(),
        quote = %config.quote_suffix,
        "[SNAPSHOT] Ticker snapshot filtered"
    );

    match timeframe.kline_interval() {
        Some(interval) => Ok(enrich_changes(
            Arc::clone(source),
            market,
            interval,
            instruments,
            config.enrichment_concurrency,
        )
        .await),
        None => Ok(instruments),
    }
}

/// Keep entries whose symbol settles in `suffix` and whose numeric fields parse
pub fn filter_quote_suffix(entries: &[TickerEntry], suffix: &str) -> Vec<InstrumentSnapshot> {
    entries
        .iter()
        .filter(|entry| entry.symbol.ends_with(suffix))
        .filter_map(|entry| match entry.to_snapshot() {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                debug!(
                    symbol = %entry.symbol,
                    error = %e,
                    "[SNAPSHOT] Skipping unparseable ticker"
                );
                None
            }
        })
        .collect()
}
