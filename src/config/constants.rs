//! Application-wide constants and configuration defaults
//!
//! This module centralizes the engine's tunables so they stay discoverable.
//! Values returned by the functions below can be overridden via environment
//! variables and feed the `Default` impls of the config sections.

// =============================================================================
// Exchange Endpoints
// =============================================================================

/// Spot market REST base URL
pub const DEFAULT_SPOT_BASE_URL: &str = "https://api.binance.com";

/// USDⓈ-M futures REST base URL
pub const DEFAULT_FUTURES_BASE_URL: &str = "https://fapi.binance.com";

/// Quote asset every reported symbol must settle in
pub const DEFAULT_QUOTE_SUFFIX: &str = "USDT";

// =============================================================================
// Request Timeouts
// =============================================================================

/// Timeout for the full-market ticker snapshot (default: 30 seconds)
///
/// Environment variable: `SNAPSHOT_TIMEOUT_SECS`
pub fn snapshot_timeout_secs() -> u64 {
    env_or("SNAPSHOT_TIMEOUT_SECS", 30)
}

/// Timeout for each per-symbol kline request (default: 10 seconds)
///
/// Environment variable: `CANDLE_TIMEOUT_SECS`
pub fn candle_timeout_secs() -> u64 {
    env_or("CANDLE_TIMEOUT_SECS", 10)
}

// =============================================================================
// Engine Tunables
// =============================================================================

/// Maximum in-flight kline requests during change enrichment (default: 10)
///
/// Environment variable: `ENRICHMENT_CONCURRENCY`
pub fn enrichment_concurrency() -> usize {
    env_or("ENRICHMENT_CONCURRENCY", 10)
}

/// Number of entries in the top gainers view
pub const DEFAULT_GAINERS_LIMIT: usize = 5;

/// Minimum |change| (percent) for the pump/dump view
pub const DEFAULT_PUMP_DUMP_THRESHOLD: f64 = 0.1;

/// Kline interval of the volatility lookback window
pub const DEFAULT_VOLATILITY_INTERVAL: &str = "1h";

/// Number of candles in the volatility lookback window
pub const DEFAULT_VOLATILITY_LOOKBACK: u16 = 24;

/// Candles needed for a close-to-close change
pub const CHANGE_WINDOW_CANDLES: u16 = 2;

// =============================================================================
// Report Loop
// =============================================================================

/// Delay between two reports for one selection (default: 60 seconds)
///
/// Environment variable: `REPORT_INTERVAL_SECS`
pub fn report_interval_secs() -> u64 {
    env_or("REPORT_INTERVAL_SECS", 60)
}

/// Capacity of the channel carrying rendered reports
pub const REPORT_CHANNEL_CAPACITY: usize = 16;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
