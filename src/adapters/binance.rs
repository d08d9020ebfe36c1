//! Binance REST client for spot and USDⓈ-M futures market data
//!
//! Two endpoints are used, structurally identical on both venues:
//! - `GET {base}{prefix}/ticker/24hr`
//! - `GET {base}{prefix}/klines?symbol=S&interval=I&limit=L`
//!
//! The snapshot call gets a long timeout; kline calls get a short one since
//! they run inside a fan-out where one slow symbol must not stall the batch.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::MarketDataSource;
use crate::adapters::types::{create_http_client, Candle, TickerEntry};
use crate::config::ExchangeConfig;
use crate::core::types::Market;

/// Longest response body echoed back inside an error message
const MAX_ERROR_BODY_CHARS: usize = 256;

/// HTTP client for the Binance public market data API
#[derive(Debug, Clone)]
pub struct BinanceClient {
    http: reqwest::Client,
    spot_base_url: String,
    futures_base_url: String,
    snapshot_timeout: Duration,
    candle_timeout: Duration,
}

impl BinanceClient {
    pub fn new(config: &ExchangeConfig) -> Self {
        Self {
            http: create_http_client("binance"),
            spot_base_url: config.spot_base_url.trim_end_matches('/').to_string(),
            futures_base_url: config.futures_base_url.trim_end_matches('/').to_string(),
            snapshot_timeout: Duration::from_secs(config.snapshot_timeout_secs),
            candle_timeout: Duration::from_secs(config.candle_timeout_secs),
        }
    }

    fn base_url(&self, market: Market) -> &str {
        match market {
            Market::Spot => &self.spot_base_url,
            Market::Futures => &self.futures_base_url,
        }
    }

    /// GET `path` on the venue and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        market: Market,
        path: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> ExchangeResult<T> {
        let url = format!("{}{}{}", self.base_url(market), market.api_prefix(), path);
        let timeout_ms = timeout.as_millis() as u64;

        let response = self
            .http
            .get(&url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ExchangeError::from_transport(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Status {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::from_transport(e, timeout_ms))?;

        serde_json::from_str(&body).map_err(|e| {
            ExchangeError::InvalidResponse(format!("{} - body: {}", e, truncate(&body)))
        })
    }
}

#[async_trait]
impl MarketDataSource for BinanceClient {
    async fn fetch_tickers(&self, market: Market) -> ExchangeResult<Vec<TickerEntry>> {
        let tickers: Vec<TickerEntry> = self
            .get_json(market, "/ticker/24hr", &[], self.snapshot_timeout)
            .await?;
        tracing::debug!(market = %market, count = tickers.len(), "Ticker snapshot received");
        Ok(tickers)
    }

    async fn fetch_candles(
        &self,
        market: Market,
        symbol: &str,
        interval: &str,
        limit: u16,
    ) -> ExchangeResult<Vec<Candle>> {
        let query = [
            ("symbol", symbol.to_string()),
            ("interval", interval.to_string()),
            ("limit", limit.to_string()),
        ];
        let rows: Vec<Vec<serde_json::Value>> = self
            .get_json(market, "/klines", &query, self.candle_timeout)
            .await?;

        rows.iter().map(|row| Candle::from_kline_row(row)).collect()
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", head)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> BinanceClient {
        let config = ExchangeConfig {
            spot_base_url: server.url(),
            futures_base_url: format!("{}/", server.url()),
            ..ExchangeConfig::default()
        };
        BinanceClient::new(&config)
    }

    #[tokio::test]
    async fn test_fetch_tickers_uses_futures_prefix() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/fapi/v1/ticker/24hr")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"symbol":"BTCUSDT","priceChangePercent":"1.5","lastPrice":"100","volume":"10"}]"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let tickers = client.fetch_tickers(Market::Futures).await.unwrap();
        assert_eq!(tickers.len(), 1);
        assert_eq!(tickers[0].symbol, "BTCUSDT");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_tickers_non_2xx_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v3/ticker/24hr")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client = client_for(&server);
        match client.fetch_tickers(Market::Spot).await {
            Err(ExchangeError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_tickers_malformed_json_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/fapi/v1/ticker/24hr")
            .with_status(200)
            .with_body(r#"{"not":"an array"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.fetch_tickers(Market::Futures).await.unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidResponse(_)), "Got: {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_candles_sends_query_and_parses_rows() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/fapi/v1/klines")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("symbol".into(), "ETHUSDT".into()),
                Matcher::UrlEncoded("interval".into(), "15m".into()),
                Matcher::UrlEncoded("limit".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"[[1700000000000,"10.0","11.0","9.0","10.0","5"],
                    [1700000900000,"10.0","12.0","9.5","11.0","6"]]"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let candles = client
            .fetch_candles(Market::Futures, "ETHUSDT", "15m", 2)
            .await
            .unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, 10.0);
        assert_eq!(candles[1].close, 11.0);
        assert_eq!(candles[1].high, 12.0);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_connection_failed() {
        let config = ExchangeConfig {
            futures_base_url: "http://127.0.0.1:1".to_string(),
            ..ExchangeConfig::default()
        };
        let client = BinanceClient::new(&config);
        let err = client.fetch_tickers(Market::Futures).await.unwrap_err();
        assert!(matches!(err, ExchangeError::ConnectionFailed(_)), "Got: {:?}", err);
    }

    /// Accepts connections and holds them open without ever answering
    async fn silent_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_candle_request_times_out() {
        let url = silent_server().await;
        let config = ExchangeConfig {
            futures_base_url: url,
            candle_timeout_secs: 1,
            ..ExchangeConfig::default()
        };
        let client = BinanceClient::new(&config);

        let err = client
            .fetch_candles(Market::Futures, "BTCUSDT", "5m", 2)
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::NetworkTimeout(1000)), "Got: {:?}", err);
    }

    #[tokio::test]
    async fn test_snapshot_request_times_out() {
        let url = silent_server().await;
        let config = ExchangeConfig {
            spot_base_url: url,
            snapshot_timeout_secs: 1,
            ..ExchangeConfig::default()
        };
        let client = BinanceClient::new(&config);

        let err = client.fetch_tickers(Market::Spot).await.unwrap_err();
        assert!(matches!(err, ExchangeError::NetworkTimeout(1000)), "Got: {:?}", err);
    }

    #[test]
    fn test_client_takes_timeouts_from_config() {
        let client = BinanceClient::new(&ExchangeConfig {
            snapshot_timeout_secs: 30,
            candle_timeout_secs: 10,
            ..ExchangeConfig::default()
        });
        assert_eq!(client.snapshot_timeout, Duration::from_secs(30));
        assert_eq!(client.candle_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "x".repeat(1000);
        let out = truncate(&body);
        assert_eq!(out.len(), MAX_ERROR_BODY_CHARS + 3);
        assert!(out.ends_with("..."));
        assert_eq!(truncate("short"), "short");
    }
}
