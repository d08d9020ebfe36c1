//! Exchange client error types
//!
//! All upstream-related errors are wrapped in the ExchangeError enum
//! which implements thiserror for consistent error handling.

use thiserror::Error;

/// Errors raised while talking to the exchange REST API
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Connection to exchange failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete within its timeout
    #[error("Network timeout after {0}ms")]
    NetworkTimeout(u64),

    /// Exchange answered with a non-2xx status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid or unexpected response from exchange
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Response decoded but did not hold enough data for the computation
    #[error("Insufficient data for {symbol}: {reason}")]
    InsufficientData { symbol: String, reason: String },
}

impl ExchangeError {
    /// Map a reqwest transport error, keeping timeouts distinguishable
    pub(crate) fn from_transport(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ExchangeError::NetworkTimeout(timeout_ms)
        } else if err.is_decode() {
            ExchangeError::InvalidResponse(err.to_string())
        } else {
            ExchangeError::ConnectionFailed(err.to_string())
        }
    }
}

/// Result type alias for exchange operations
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;
