//! Market data source trait definition
//!
//! The engine only ever talks to the exchange through `MarketDataSource`,
//! which lets tests drive it with an in-memory source.

use async_trait::async_trait;

use crate::adapters::errors::ExchangeResult;
use crate::adapters::types::{Candle, TickerEntry};
use crate::core::types::Market;

/// Read-only access to the two REST call shapes the engine needs
///
/// Implementations perform no retries: a failed call is reported once and the
/// caller decides what to do with it.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Full-market rolling 24h ticker list
    async fn fetch_tickers(&self, market: Market) -> ExchangeResult<Vec<TickerEntry>>;

    /// The most recent `limit` candles for one symbol, oldest first
    ///
    /// # Arguments
    /// * `symbol` - Exchange symbol (e.g., "BTCUSDT")
    /// * `interval` - Kline interval (e.g., "5m", "1h")
    /// * `limit` - Number of candles to request
    async fn fetch_candles(
        &self,
        market: Market,
        symbol: &str,
        interval: &str,
        limit: u16,
    ) -> ExchangeResult<Vec<Candle>>;
}
