//! Configuration types for the report engine
//!
//! This module defines all configuration structs that are loaded from YAML.
//! Every section falls back to its defaults, so an empty file is a valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::config::constants;
use crate::core::types::{Action, Market, Timeframe};
use crate::error::AppError;

// ============================================================================
// Configuration Structs
// ============================================================================

/// Upstream REST endpoints and request timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Spot venue base URL (e.g., https://api.binance.com)
    pub spot_base_url: String,
    /// Futures venue base URL (e.g., https://fapi.binance.com)
    pub futures_base_url: String,
    /// Timeout for the full ticker snapshot
    pub snapshot_timeout_secs: u64,
    /// Timeout for each kline request
    pub candle_timeout_secs: u64,
}

/// Aggregation and ranking parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Quote-currency suffix used as the inclusion filter
    pub quote_suffix: String,
    /// Maximum concurrent kline requests during change enrichment
    pub enrichment_concurrency: usize,
    /// Length of the top gainers view
    pub gainers_limit: usize,
    /// Minimum |change| in percent for the pump/dump view
    pub pump_dump_threshold: f64,
    /// Kline interval of the volatility window
    pub volatility_interval: String,
    /// Number of candles in the volatility window
    pub volatility_lookback: u16,
}

/// What the periodic report loop asks the engine for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub market: Market,
    pub action: Action,
    pub timeframe: Timeframe,
    /// Delay between two reports
    pub interval_secs: u64,
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub exchange: ExchangeConfig,
    pub engine: EngineConfig,
    pub report: ReportConfig,
}

impl ExchangeConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, url) in [
            ("spot_base_url", &self.spot_base_url),
            ("futures_base_url", &self.futures_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::Config(format!(
                    "exchange.{} must be an http(s) URL (got '{}')",
                    name, url
                )));
            }
        }

        if self.snapshot_timeout_secs == 0 || self.candle_timeout_secs == 0 {
            return Err(AppError::Config(
                "exchange timeouts must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.quote_suffix.trim().is_empty() {
            return Err(AppError::Config(
                "engine.quote_suffix cannot be empty".to_string(),
            ));
        }

        if self.enrichment_concurrency == 0 {
            return Err(AppError::Config(
                "engine.enrichment_concurrency must be >= 1".to_string(),
            ));
        }

        if self.gainers_limit == 0 {
            return Err(AppError::Config(
                "engine.gainers_limit must be >= 1".to_string(),
            ));
        }

        if !self.pump_dump_threshold.is_finite() || self.pump_dump_threshold < 0.0 {
            return Err(AppError::Config(format!(
                "engine.pump_dump_threshold must be >= 0 (got {})",
                self.pump_dump_threshold
            )));
        }

        if self.volatility_lookback == 0 {
            return Err(AppError::Config(
                "engine.volatility_lookback must be >= 1".to_string(),
            ));
        }

        if self.volatility_interval.trim().is_empty() {
            return Err(AppError::Config(
                "engine.volatility_interval cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl AppConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        self.exchange.validate()?;
        self.engine.validate()?;

        if self.report.interval_secs == 0 {
            return Err(AppError::Config(
                "report.interval_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            spot_base_url: constants::DEFAULT_SPOT_BASE_URL.to_string(),
            futures_base_url: constants::DEFAULT_FUTURES_BASE_URL.to_string(),
            snapshot_timeout_secs: constants::snapshot_timeout_secs(),
            candle_timeout_secs: constants::candle_timeout_secs(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quote_suffix: constants::DEFAULT_QUOTE_SUFFIX.to_string(),
            enrichment_concurrency: constants::enrichment_concurrency(),
            gainers_limit: constants::DEFAULT_GAINERS_LIMIT,
            pump_dump_threshold: constants::DEFAULT_PUMP_DUMP_THRESHOLD,
            volatility_interval: constants::DEFAULT_VOLATILITY_INTERVAL.to_string(),
            volatility_lookback: constants::DEFAULT_VOLATILITY_LOOKBACK,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            market: Market::Futures,
            action: Action::Gainers,
            timeframe: Timeframe::OneDay,
            interval_secs: constants::report_interval_secs(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.quote_suffix, "USDT");
        assert_eq!(config.engine.gainers_limit, 5);
        assert_eq!(config.engine.volatility_lookback, 24);
        assert_eq!(config.report.market, Market::Futures);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = AppConfig::default();
        config.engine.enrichment_concurrency = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("enrichment_concurrency"));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut config = AppConfig::default();
        config.engine.pump_dump_threshold = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_url_rejected() {
        let mut config = AppConfig::default();
        config.exchange.spot_base_url = "ftp://example.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("spot_base_url"));
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let mut config = AppConfig::default();
        config.engine.quote_suffix = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_report_interval_rejected() {
        let mut config = AppConfig::default();
        config.report.interval_secs = 0;
        assert!(config.validate().is_err());
    }
}
