//! End-to-end engine tests against a mocked Binance REST API
//!
//! Drives `MarketEngine<BinanceClient>` through real HTTP against a local
//! mockito server: URL layout, query parameters, JSON decoding and the
//! error mapping all run as in production.
//!
//! # Running the tests
//! ```bash
//! cargo test --test binance_end_to_end
//! ```

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use market_pulse::config::{AppConfig, ExchangeConfig};
use market_pulse::core::{build_report, Action, Market, MarketEngine, Selection, Timeframe};
use market_pulse::report::DATA_UNAVAILABLE_MESSAGE;

fn engine_for(server: &ServerGuard) -> MarketEngine<market_pulse::adapters::BinanceClient> {
    let config = AppConfig {
        exchange: ExchangeConfig {
            spot_base_url: server.url(),
            futures_base_url: server.url(),
            snapshot_timeout_secs: 5,
            candle_timeout_secs: 5,
        },
        ..AppConfig::default()
    };
    MarketEngine::from_config(&config)
}

fn ticker(symbol: &str, change: &str, volume: &str) -> serde_json::Value {
    json!({
        "symbol": symbol,
        "priceChange": "0",
        "priceChangePercent": change,
        "lastPrice": "100.0",
        "volume": volume,
        "quoteVolume": "0",
        "count": 10
    })
}

/// Kline rows with `high/low/close` per candle; times are arbitrary
fn klines(rows: &[(f64, f64, f64)]) -> String {
    let body: Vec<serde_json::Value> = rows
        .iter()
        .enumerate()
        .map(|(i, (high, low, close))| {
            json!([
                1_700_000_000_000i64 + i as i64 * 60_000,
                close.to_string(),
                high.to_string(),
                low.to_string(),
                close.to_string(),
                "1000.0",
                1_700_000_059_999i64 + i as i64 * 60_000,
                "0",
                1,
                "0",
                "0",
                "0"
            ])
        })
        .collect();
    serde_json::Value::Array(body).to_string()
}

fn kline_query(symbol: &str, interval: &str, limit: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("symbol".into(), symbol.into()),
        Matcher::UrlEncoded("interval".into(), interval.into()),
        Matcher::UrlEncoded("limit".into(), limit.into()),
    ])
}

#[tokio::test]
async fn test_futures_15m_gainers_over_http() {
    let mut server = Server::new_async().await;
    let tickers = json!([
        ticker("BTCUSDT", "1.0", "10"),
        ticker("ETHUSDT", "1.0", "10"),
        ticker("SOLUSDT", "1.0", "10"),
        ticker("ETHBTC", "99.0", "10"),
    ]);
    let snapshot = server
        .mock("GET", "/fapi/v1/ticker/24hr")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(tickers.to_string())
        .expect(1)
        .create_async()
        .await;

    let btc = server
        .mock("GET", "/fapi/v1/klines")
        .match_query(kline_query("BTCUSDT", "15m", "2"))
        .with_status(200)
        .with_body(klines(&[(100.0, 100.0, 100.0), (103.0, 103.0, 103.0)]))
        .create_async()
        .await;
    let eth = server
        .mock("GET", "/fapi/v1/klines")
        .match_query(kline_query("ETHUSDT", "15m", "2"))
        .with_status(200)
        .with_body(klines(&[(50.0, 50.0, 50.0), (49.0, 49.0, 49.0)]))
        .create_async()
        .await;
    let sol = server
        .mock("GET", "/fapi/v1/klines")
        .match_query(kline_query("SOLUSDT", "15m", "2"))
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let engine = engine_for(&server);
    let result = engine
        .fetch_top_gainers(Market::Futures, Timeframe::FifteenMinutes)
        .await
        .unwrap();

    let symbols: Vec<&str> = result.iter().map(|i| i.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["BTCUSDT", "ETHUSDT"]);
    assert_eq!(result[0].price_change_percent, 3.0);
    assert_eq!(result[1].price_change_percent, -2.0);
    assert_eq!(result[0].price_change_display, "3.00");
    assert_eq!(result[1].price_change_display, "-2.00");

    snapshot.assert_async().await;
    btc.assert_async().await;
    eth.assert_async().await;
    sol.assert_async().await;
}

#[tokio::test]
async fn test_spot_daily_pump_dump_over_http() {
    let mut server = Server::new_async().await;
    let tickers = json!([
        ticker("AAAUSDT", "-4.0", "2500000"),
        ticker("BBBUSDT", "0.02", "1"),
    ]);
    let _snapshot = server
        .mock("GET", "/api/v3/ticker/24hr")
        .with_status(200)
        .with_body(tickers.to_string())
        .create_async()
        .await;
    let volatility = server
        .mock("GET", "/api/v3/klines")
        .match_query(kline_query("AAAUSDT", "1h", "24"))
        .with_status(200)
        .with_body(klines(&[(12.0, 9.0, 11.0), (11.0, 8.0, 10.0)]))
        .expect(1)
        .create_async()
        .await;

    let engine = engine_for(&server);
    let selection = Selection::new(Market::Spot, Action::PumpDump, Timeframe::OneDay);
    let report = build_report(&engine, &selection).await;

    // current 10, min 8, max 12
    assert_eq!(
        report,
        "[❕ 🔴 AAAUSDT -4.0%\n24H Vol: 2.500 M\nMax Dump: -20.00% Max Pump: +20.00%]\n\n"
    );
    volatility.assert_async().await;
}

#[tokio::test]
async fn test_daily_gainers_report_shows_exchange_change_text() {
    let mut server = Server::new_async().await;
    let tickers = json!([ticker("ETHUSDT", "1.234", "10"), ticker("BTCUSDT", "-0.095", "10")]);
    let _snapshot = server
        .mock("GET", "/fapi/v1/ticker/24hr")
        .with_status(200)
        .with_body(tickers.to_string())
        .create_async()
        .await;

    let engine = engine_for(&server);
    let selection = Selection::new(Market::Futures, Action::Gainers, Timeframe::OneDay);
    let report = build_report(&engine, &selection).await;

    assert_eq!(
        report,
        "Top gainers on futures for 24h:\nETHUSDT: 1.234%\nBTCUSDT: -0.095%\n"
    );
}

#[tokio::test]
async fn test_snapshot_server_error_yields_unavailable_report() {
    let mut server = Server::new_async().await;
    let _snapshot = server
        .mock("GET", "/fapi/v1/ticker/24hr")
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let engine = engine_for(&server);

    let err = engine
        .fetch_top_gainers(Market::Futures, Timeframe::OneDay)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("503"), "Got: {}", err);

    let selection = Selection::new(Market::Futures, Action::Gainers, Timeframe::OneDay);
    assert_eq!(build_report(&engine, &selection).await, DATA_UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn test_malformed_snapshot_is_error() {
    let mut server = Server::new_async().await;
    let _snapshot = server
        .mock("GET", "/fapi/v1/ticker/24hr")
        .with_status(200)
        .with_body("{not json")
        .create_async()
        .await;

    let engine = engine_for(&server);
    let result = engine.fetch_pump_dump(Market::Futures, Timeframe::OneHour).await;
    assert!(result.is_err());
}
