//! Text rendering of engine results
//!
//! The messaging layer sends these strings as-is. The change is shown as the
//! exchange reported it for 24h and with two decimals once recomputed; max
//! dump and max pump always use two decimals. Their leading minus and plus
//! are display conventions applied here, not part of the computed values.

use std::fmt::Write;

use crate::core::types::{InstrumentSnapshot, Market, Timeframe};

/// Sent instead of a report when the engine fails as a whole
pub const DATA_UNAVAILABLE_MESSAGE: &str =
    "Market data is currently unavailable. Please try again later.";

/// Body used when the ranking came back empty
pub const NO_INSTRUMENTS_MESSAGE: &str = "No instruments matched.";

const UP_MARKER: &str = "🟢";
const DOWN_MARKER: &str = "🔴";

/// Scale a volume to B/M/K with three decimals
///
/// ```
/// use market_pulse::report::format_volume;
/// assert_eq!(format_volume(1_500_000_000.0), "1.500 B");
/// assert_eq!(format_volume(750.0), "750.000");
/// ```
pub fn format_volume(volume: f64) -> String {
    if volume >= 1e9 {
        format!("{:.3} B", volume / 1e9)
    } else if volume >= 1e6 {
        format!("{:.3} M", volume / 1e6)
    } else if volume >= 1e3 {
        format!("{:.3} K", volume / 1e3)
    } else {
        format!("{:.3}", volume)
    }
}

/// Header line followed by one `SYMBOL: CHANGE%` line per instrument
pub fn render_gainers(
    instruments: &[InstrumentSnapshot],
    market: Market,
    timeframe: Timeframe,
) -> String {
    let mut message = format!("Top gainers on {} for {}:\n", market, timeframe);
    if instruments.is_empty() {
        message.push_str(NO_INSTRUMENTS_MESSAGE);
        message.push('\n');
        return message;
    }
    for instrument in instruments {
        let _ = writeln!(
            message,
            "{}: {}%",
            instrument.symbol, instrument.price_change_display
        );
    }
    message
}

/// One bracketed block per instrument, blocks separated by a blank line
pub fn render_pump_dump(instruments: &[InstrumentSnapshot]) -> String {
    if instruments.is_empty() {
        return format!("{}\n", NO_INSTRUMENTS_MESSAGE);
    }

    let mut message = String::new();
    for instrument in instruments {
        let marker = if instrument.price_change_percent > 0.0 {
            UP_MARKER
        } else {
            DOWN_MARKER
        };
        let _ = write!(
            message,
            "[❕ {} {} {}%\n24H Vol: {}\nMax Dump: -{}% Max Pump: +{}%]\n\n",
            marker,
            instrument.symbol,
            instrument.price_change_display,
            format_volume(instrument.volume),
            format_percent(instrument.max_dump),
            format_percent(instrument.max_pump),
        );
    }
    message
}

fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_volume_thresholds() {
        assert_eq!(format_volume(1_500_000_000.0), "1.500 B");
        assert_eq!(format_volume(2_500_000.0), "2.500 M");
        assert_eq!(format_volume(12_345.0), "12.345 K");
        assert_eq!(format_volume(750.0), "750.000");
        assert_eq!(format_volume(1_000.0), "1.000 K");
        assert_eq!(format_volume(0.0), "0.000");
    }

    #[test]
    fn test_render_gainers_lines() {
        let list = vec![
            InstrumentSnapshot::new("BTCUSDT", 2.5, 1.0, 1.0),
            InstrumentSnapshot::new("ETHUSDT", -0.4, 1.0, 1.0),
        ];
        let text = render_gainers(&list, Market::Futures, Timeframe::FifteenMinutes);
        assert_eq!(
            text,
            "Top gainers on futures for 15m:\nBTCUSDT: 2.50%\nETHUSDT: -0.40%\n"
        );
    }

    #[test]
    fn test_render_gainers_keeps_native_daily_change() {
        let mut eth = InstrumentSnapshot::new("ETHUSDT", 1.234, 1.0, 1.0);
        eth.price_change_display = "1.234".to_string();
        let mut btc = InstrumentSnapshot::new("BTCUSDT", -0.095, 1.0, 1.0);
        btc.price_change_display = "-0.095".to_string();

        let text = render_gainers(&[eth, btc], Market::Futures, Timeframe::OneDay);
        assert_eq!(
            text,
            "Top gainers on futures for 24h:\nETHUSDT: 1.234%\nBTCUSDT: -0.095%\n"
        );
    }

    #[test]
    fn test_render_gainers_empty() {
        let text = render_gainers(&[], Market::Spot, Timeframe::OneDay);
        assert!(text.starts_with("Top gainers on spot for 24h:\n"));
        assert!(text.contains(NO_INSTRUMENTS_MESSAGE));
    }

    #[test]
    fn test_render_pump_dump_block() {
        let mut up = InstrumentSnapshot::new("SOLUSDT", 3.21, 150.0, 2_500_000.0);
        up.max_dump = Some(4.5);
        up.max_pump = Some(1.25);
        let mut down = InstrumentSnapshot::new("XRPUSDT", -1.0, 0.5, 750.0);
        down.max_dump = Some(0.0);
        down.max_pump = Some(0.0);

        let text = render_pump_dump(&[up, down]);
        assert_eq!(
            text,
            "[❕ 🟢 SOLUSDT 3.21%\n24H Vol: 2.500 M\nMax Dump: -4.50% Max Pump: +1.25%]\n\n\
             [❕ 🔴 XRPUSDT -1.00%\n24H Vol: 750.000\nMax Dump: -0.00% Max Pump: +0.00%]\n\n"
        );
    }

    #[test]
    fn test_render_pump_dump_zero_change_is_down_marker() {
        let text = render_pump_dump(&[InstrumentSnapshot::new("FLATUSDT", 0.0, 1.0, 1.0)]);
        assert!(text.contains(DOWN_MARKER));
        assert!(text.contains("Max Dump: -n/a%"));
    }

    #[test]
    fn test_render_pump_dump_empty() {
        assert_eq!(render_pump_dump(&[]), format!("{}\n", NO_INSTRUMENTS_MESSAGE));
    }
}
