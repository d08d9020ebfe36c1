//! Domain types shared by every stage of the engine
//!
//! `Market`, `Timeframe` and `Action` parse from the lowercase strings the
//! report subscribers send, failing with `AppError::Validation` on anything
//! unrecognized so that no network call is ever issued for bad input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// =============================================================================
// Market
// =============================================================================

/// Venue selector: controls the base URL and API path prefix
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Spot,
    Futures,
}

impl Market {
    /// REST path prefix for this venue
    pub fn api_prefix(&self) -> &'static str {
        match self {
            Market::Spot => "/api/v3",
            Market::Futures => "/fapi/v1",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::Spot => write!(f, "spot"),
            Market::Futures => write!(f, "futures"),
        }
    }
}

impl FromStr for Market {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spot" => Ok(Market::Spot),
            "futures" => Ok(Market::Futures),
            other => Err(AppError::Validation(format!("unknown market: {}", other))),
        }
    }
}

// =============================================================================
// Timeframe
// =============================================================================

/// Window over which the price change is reported
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Timeframe {
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "24h")]
    OneDay,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::FiveMinutes,
        Timeframe::FifteenMinutes,
        Timeframe::OneHour,
        Timeframe::FourHours,
        Timeframe::OneDay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::FiveMinutes => "5m",
            Timeframe::FifteenMinutes => "15m",
            Timeframe::OneHour => "1h",
            Timeframe::FourHours => "4h",
            Timeframe::OneDay => "24h",
        }
    }

    /// Kline interval used to recompute the change, `None` when the snapshot's
    /// native rolling 24h figure is used as-is
    pub fn kline_interval(&self) -> Option<&'static str> {
        match self {
            Timeframe::OneDay => None,
            other => Some(other.as_str()),
        }
    }

}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("unsupported timeframe: {}", s)))
    }
}

// =============================================================================
// Action
// =============================================================================

/// Which ranked view a subscriber asked for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Gainers,
    #[serde(rename = "pumpdump")]
    PumpDump,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Gainers => write!(f, "gainers"),
            Action::PumpDump => write!(f, "pumpdump"),
        }
    }
}

impl FromStr for Action {
    type Err = AppError;

    /// Accepts both the short names and the `action_` prefixed callback names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("action_").unwrap_or(s) {
            "gainers" => Ok(Action::Gainers),
            "pumpdump" => Ok(Action::PumpDump),
            _ => Err(AppError::Validation(format!("unknown action: {}", s))),
        }
    }
}

// =============================================================================
// Selection
// =============================================================================

/// A subscriber's request: which view, on which venue, over which window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub market: Market,
    pub action: Action,
    pub timeframe: Timeframe,
}

impl Selection {
    pub fn new(market: Market, action: Action, timeframe: Timeframe) -> Self {
        Self { market, action, timeframe }
    }

    /// Parse an `ACTION_TIMEFRAME` deep-link payload (e.g. `gainers_5m`,
    /// `action_pumpdump_1h`). The timeframe is everything after the last `_`.
    pub fn from_payload(payload: &str, market: Market) -> Result<Self, AppError> {
        let (action, timeframe) = payload
            .trim()
            .rsplit_once('_')
            .ok_or_else(|| AppError::Validation(format!("malformed selection: {:?}", payload)))?;

        Ok(Self::new(market, action.parse()?, timeframe.parse()?))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{} on {}", self.action, self.timeframe, self.market)
    }
}

// =============================================================================
// Instrument Snapshot
// =============================================================================

/// One traded symbol at a point in time
///
/// Lives for a single engine invocation: created from the ticker snapshot,
/// mutated by the enrichment and volatility stages, dropped after rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentSnapshot {
    pub symbol: String,
    /// Percent change over the active timeframe
    pub price_change_percent: f64,
    /// Change as shown to users: the exchange's own figure for 24h, two
    /// decimals once recomputed
    pub price_change_display: String,
    pub last_price: f64,
    pub volume: f64,
    /// Drawdown from current price to the lookback low (pump/dump path only)
    pub max_dump: Option<f64>,
    /// Run-up from current price to the lookback high (pump/dump path only)
    pub max_pump: Option<f64>,
}

impl InstrumentSnapshot {
    pub fn new(
        symbol: impl Into<String>,
        price_change_percent: f64,
        last_price: f64,
        volume: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price_change_percent,
            price_change_display: format!("{:.2}", price_change_percent),
            last_price,
            volume,
            max_dump: None,
            max_pump: None,
        }
    }

    /// Replace the change with a recomputed value
    pub fn set_change(&mut self, price_change_percent: f64) {
        self.price_change_percent = price_change_percent;
        self.price_change_display = format!("{:.2}", price_change_percent);
    }
}

/// Round to two decimal places, the precision every derived percentage is reported at
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Tests
// =============================================================================
