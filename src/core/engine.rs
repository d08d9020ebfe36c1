//! Market data aggregation engine
//!
//! Entry points consumed by the report layer. Each call is a stateless,
//! best-effort snapshot computation:
//!
//! ```text
//! snapshot ─┬─ (timeframe != 24h) enrichment ─┬─ top gainers
//!           │                                 └─ volatility ── pump/dump
//! ```

use std::sync::Arc;

use tracing::info;

use crate::adapters::{BinanceClient, MarketDataSource};
use crate::config::{AppConfig, EngineConfig};
use crate::core::ranking::{rank_by_magnitude, top_gainers};
use crate::core::snapshot::fetch_snapshot;
use crate::core::types::{Action, InstrumentSnapshot, Market, Selection, Timeframe};
use crate::core::volatility::annotate_volatility;
use crate::error::Result;

/// Aggregation engine over any `MarketDataSource`
pub struct MarketEngine<S: ?Sized> {
    source: Arc<S>,
    config: EngineConfig,
}

impl MarketEngine<BinanceClient> {
    /// Build an engine backed by the Binance REST client
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(BinanceClient::new(&config.exchange)), config.engine.clone())
    }
}

impl<S> MarketEngine<S>
where
    S: MarketDataSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>, config: EngineConfig) -> Self {
        Self { source, config }
    }

    /// Top movers by change, descending, at most `gainers_limit` entries
    pub async fn fetch_top_gainers(
        &self,
        market: Market,
        timeframe: Timeframe,
    ) -> Result<Vec<InstrumentSnapshot>> {
        let instruments = fetch_snapshot(&self.source, &self.config, market, timeframe).await?;
        let ranked = top_gainers(instruments, self.config.gainers_limit);

        info!(
            market = %market,
            timeframe = %timeframe,
            returned = ranked.len(),
            "[ENGINE] Top gainers ready"
        );
        Ok(ranked)
    }

    /// Instruments with |change| above the threshold, annotated with their
    /// volatility range and sorted by |change| descending
    pub async fn fetch_pump_dump(
        &self,
        market: Market,
        timeframe: Timeframe,
    ) -> Result<Vec<InstrumentSnapshot>> {
        let instruments = fetch_snapshot(&self.source, &self.config, market, timeframe).await?;
        let annotated =
            annotate_volatility(Arc::clone(&self.source), market, instruments, &self.config).await;
        let ranked = rank_by_magnitude(annotated);

        info!(
            market = %market,
            timeframe = %timeframe,
            returned = ranked.len(),
            "[ENGINE] Pump/dump candidates ready"
        );
        Ok(ranked)
    }

    /// Dispatch on the selection's action
    pub async fn fetch(&self, selection: &Selection) -> Result<Vec<InstrumentSnapshot>> {
        match selection.action {
            Action::Gainers => self.fetch_top_gainers(selection.market, selection.timeframe).await,
            Action::PumpDump => self.fetch_pump_dump(selection.market, selection.timeframe).await,
        }
    }

    /// String-typed variant of [`Self::fetch_top_gainers`]
    ///
    /// # Errors
    /// `AppError::Validation` for an unknown market or timeframe, before any request.
    pub async fn fetch_top_gainers_str(
        &self,
        market: &str,
        timeframe: &str,
    ) -> Result<Vec<InstrumentSnapshot>> {
        let (market, timeframe) = parse_inputs(market, timeframe)?;
        self.fetch_top_gainers(market, timeframe).await
    }

    /// String-typed variant of [`Self::fetch_pump_dump`]
    ///
    /// # Errors
    /// `AppError::Validation` for an unknown market or timeframe, before any request.
    pub async fn fetch_pump_dump_str(
        &self,
        market: &str,
        timeframe: &str,
    ) -> Result<Vec<InstrumentSnapshot>> {
        let (market, timeframe) = parse_inputs(market, timeframe)?;
        self.fetch_pump_dump(market, timeframe).await
    }
}

fn parse_inputs(market: &str, timeframe: &str) -> Result<(Market, Timeframe)> {
    Ok((market.parse()?, timeframe.parse()?))
}
