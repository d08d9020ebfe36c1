//! Configuration module for engine settings and YAML loading
//!
//! This module provides:
//! - Configuration types (`AppConfig`, `ExchangeConfig`, `EngineConfig`, `ReportConfig`)
//! - YAML loading functionality (`load_config`)
//! - Application constants with environment variable overrides
//! - Logging initialization

pub mod constants;
mod loader;
pub mod logging;
mod types;

// Re-export types
pub use types::{AppConfig, EngineConfig, ExchangeConfig, ReportConfig};

// Re-export loader functions
pub use loader::{load_config, load_config_from_str};
