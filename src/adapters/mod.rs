//! Exchange client for the market data REST API
//!
//! The engine depends only on the `MarketDataSource` trait; `BinanceClient`
//! is the production implementation.

pub mod binance;
pub mod errors;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use binance::BinanceClient;
pub use errors::{ExchangeError, ExchangeResult};
pub use traits::MarketDataSource;
pub use types::{Candle, TickerEntry};
