//! Core module - aggregation pipeline, ranking and the report loop
//!
//! # Module Architecture
//!
//! This module uses **explicit re-exports** instead of glob exports (`pub use module::*`)
//! to keep the public API deliberate.
//!
//! ## Usage
//! Prefer importing from `crate::core`:
//! ```ignore
//! use crate::core::{MarketEngine, Market, Timeframe};
//! ```

pub mod engine;
pub mod enrichment;
pub mod ranking;
pub mod runtime;
pub mod snapshot;
pub mod types;
pub mod volatility;

// Explicit re-exports for domain types
pub use types::{Action, InstrumentSnapshot, Market, Selection, Timeframe};

// Explicit re-exports for the pipeline stages
pub use engine::MarketEngine;
pub use enrichment::{change_from_candles, enrich_changes};
pub use ranking::{is_mover, rank_by_magnitude, top_gainers};
pub use snapshot::{fetch_snapshot, filter_quote_suffix};
pub use volatility::{annotate_volatility, compute_range, VolatilityRange};

// Explicit re-exports for runtime module
pub use runtime::{build_report, report_task};
