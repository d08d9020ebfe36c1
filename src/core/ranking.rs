//! Ranking & selection policies
//!
//! - Top gainers: change descending, truncated to the configured length.
//! - Pump/dump: |change| descending, no truncation.
//!
//! Both sorts are stable and leave ties in input order.

use crate::core::types::InstrumentSnapshot;

/// True when the instrument moved at least `threshold` percent in either direction
pub fn is_mover(instrument: &InstrumentSnapshot, threshold: f64) -> bool {
    instrument.price_change_percent.abs() >= threshold
}

/// Highest change first, at most `limit` entries
pub fn top_gainers(
    mut instruments: Vec<InstrumentSnapshot>,
    limit: usize,
) -> Vec<InstrumentSnapshot> {
    instruments.sort_by(|a, b| b.price_change_percent.total_cmp(&a.price_change_percent));
    instruments.truncate(limit);
    instruments
}

/// Largest absolute change first
pub fn rank_by_magnitude(mut instruments: Vec<InstrumentSnapshot>) -> Vec<InstrumentSnapshot> {
    instruments.sort_by(|a, b| {
        b.price_change_percent
            .abs()
            .total_cmp(&a.price_change_percent.abs())
    });
    instruments
}
