//! Application-wide error types using thiserror
//!
//! All errors surfaced by the engine are wrapped in AppError
//! to provide consistent error handling across the codebase.

use thiserror::Error;
use crate::adapters::errors::ExchangeError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unrecognized market, timeframe or selection; raised before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// True for errors caused by bad caller input rather than the upstream
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
