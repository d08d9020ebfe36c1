//! Market Pulse - futures market movers report engine
//!
//! Periodic market movement summaries built from a Binance ticker snapshot:
//! - Exchange client (spot / futures REST)
//! - Change enrichment over sub-daily timeframes with bounded fan-out
//! - Volatility ranges and the two ranked views (top gainers, pump/dump)
//! - Text rendering and a periodic report task

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod report;

pub use error::AppError;
