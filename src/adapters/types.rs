//! Wire types for the exchange REST API and the shared HTTP client builder
//!
//! The exchange reports every price and volume as a numeric string, so the
//! raw records keep them as `String` and convert explicitly, surfacing a
//! typed error when a field does not parse.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::core::types::InstrumentSnapshot;

// =============================================================================
// HTTP Client Constants
// =============================================================================

/// Max idle connections per host in connection pool
const HTTP_POOL_MAX_IDLE: usize = 16;
/// How long idle connections stay in the pool (seconds)
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 60;
/// HTTP connection timeout (milliseconds)
const HTTP_CONNECT_TIMEOUT_MS: u64 = 5000;
/// TCP keepalive interval (seconds)
const HTTP_TCP_KEEPALIVE_SECS: u64 = 30;

/// Create the pooled HTTP client shared by snapshot and kline requests
///
/// No client-wide request timeout is set: each call shape applies its own.
pub fn create_http_client(exchange_name: &str) -> reqwest::Client {
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE)
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .tcp_keepalive(Duration::from_secs(HTTP_TCP_KEEPALIVE_SECS))
        .connect_timeout(Duration::from_millis(HTTP_CONNECT_TIMEOUT_MS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());
    tracing::info!(
        phase = "init",
        exchange = %exchange_name,
        connect_timeout_ms = HTTP_CONNECT_TIMEOUT_MS,
        pool_max_idle = HTTP_POOL_MAX_IDLE,
        pool_idle_timeout_s = HTTP_POOL_IDLE_TIMEOUT_SECS,
        tcp_keepalive_s = HTTP_TCP_KEEPALIVE_SECS,
        "HTTP client configured"
    );
    client
}

// =============================================================================
// 24h Ticker
// =============================================================================

/// One entry of the `/ticker/24hr` response; unknown fields are ignored
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerEntry {
    pub symbol: String,
    pub price_change_percent: String,
    pub last_price: String,
    pub volume: String,
}

impl TickerEntry {
    /// Convert the string fields into an engine record
    ///
    /// The change keeps the exchange's own text for display.
    pub fn to_snapshot(&self) -> ExchangeResult<InstrumentSnapshot> {
        let mut snapshot = InstrumentSnapshot::new(
            self.symbol.clone(),
            parse_decimal_str(&self.symbol, "priceChangePercent", &self.price_change_percent)?,
            parse_decimal_str(&self.symbol, "lastPrice", &self.last_price)?,
            parse_decimal_str(&self.symbol, "volume", &self.volume)?,
        );
        snapshot.price_change_display = self.price_change_percent.clone();
        Ok(snapshot)
    }
}

fn parse_decimal_str(symbol: &str, field: &str, raw: &str) -> ExchangeResult<f64> {
    raw.parse::<f64>().map_err(|e| {
        ExchangeError::InvalidResponse(format!(
            "{}: field '{}' is not numeric ({:?}): {}",
            symbol, field, raw, e
        ))
    })
}

// =============================================================================
// Candles
// =============================================================================

/// Index of each field inside a kline row
const KLINE_OPEN_TIME: usize = 0;
const KLINE_OPEN: usize = 1;
const KLINE_HIGH: usize = 2;
const KLINE_LOW: usize = 3;
const KLINE_CLOSE: usize = 4;

/// OHLC summary for one interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Build a candle from one row of the `/klines` response
    ///
    /// Rows look like `[1499040000000, "0.0163", "0.8000", "0.0157", "0.0157", ...]`.
    pub fn from_kline_row(row: &[serde_json::Value]) -> ExchangeResult<Self> {
        if row.len() <= KLINE_CLOSE {
            return Err(ExchangeError::InvalidResponse(format!(
                "kline row has {} fields, expected at least {}",
                row.len(),
                KLINE_CLOSE + 1
            )));
        }

        let open_time_ms = row[KLINE_OPEN_TIME].as_i64().ok_or_else(|| {
            ExchangeError::InvalidResponse(format!(
                "kline open time is not an integer: {}",
                row[KLINE_OPEN_TIME]
            ))
        })?;
        let open_time = DateTime::<Utc>::from_timestamp_millis(open_time_ms).ok_or_else(|| {
            ExchangeError::InvalidResponse(format!(
                "kline open time out of range: {}",
                open_time_ms
            ))
        })?;

        Ok(Self {
            open_time,
            open: kline_price(row, KLINE_OPEN)?,
            high: kline_price(row, KLINE_HIGH)?,
            low: kline_price(row, KLINE_LOW)?,
            close: kline_price(row, KLINE_CLOSE)?,
        })
    }
}

/// Prices come as numeric strings; plain JSON numbers are accepted too
fn kline_price(row: &[serde_json::Value], index: usize) -> ExchangeResult<f64> {
    let value = &row[index];
    let parsed = match value {
        serde_json::Value::String(s) => s.parse::<f64>().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        ExchangeError::InvalidResponse(format!("kline field {} is not a price: {}", index, value))
    })
}

// =============================================================================
// Tests
// =============================================================================
