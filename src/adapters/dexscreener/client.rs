//! DEX Screener Market Data Client
//!
//! Fetches a token snapshot with a single GET to `{base_url}{token_address}`.
//! Non-200 responses and transport failures are logged and reported as
//! "no data"; there are no retries.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::adapters::DEFAULT_HTTP_TIMEOUT_SECS;
use crate::ports::market_data::{MarketDataError, MarketDataPort};

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    http: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketDataError::Client(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    /// URL for a token: the address is appended verbatim to the base
    pub fn snapshot_url(&self, token_address: &str) -> String {
        format!("{}{}", self.base_url, token_address)
    }
}

#[async_trait]
impl MarketDataPort for DexScreenerClient {
    async fn fetch_snapshot(&self, token_address: &str) -> Result<Option<Value>, MarketDataError> {
        let url = self.snapshot_url(token_address);
        tracing::debug!("Fetching market data: {}", url);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to fetch data for token {}: {}", token_address, e);
                return Ok(None);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(
                "Failed to fetch data for token {}: HTTP {}",
                token_address,
                status
            );
            return Ok(None);
        }

        let body = response.json::<Value>().await.map_err(|e| MarketDataError::Decode {
            address: token_address.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_support::serve_once;

    #[test]
    fn test_client_creation() {
        let client = DexScreenerClient::new("https://api.dexscreener.com/latest/dex/tokens/");
        assert!(client.is_ok());
    }

    #[test]
    fn test_snapshot_url_appends_address() {
        let client = DexScreenerClient::new("https://api.example.com/tokens/").unwrap();
        assert_eq!(
            client.snapshot_url("0xAbC"),
            "https://api.example.com/tokens/0xAbC"
        );
    }

    #[tokio::test]
    async fn test_fetch_ok_returns_body() {
        let (base, request) = serve_once(200, r#"{"address":"0xA","price":1.5}"#).await;
        let client = DexScreenerClient::new(format!("{}/tokens/", base)).unwrap();

        let body = client.fetch_snapshot("0xA").await.unwrap().unwrap();
        assert_eq!(body["price"], 1.5);
        assert!(request.await.unwrap().starts_with("GET /tokens/0xA "));
    }

    #[tokio::test]
    async fn test_fetch_404_is_no_data() {
        let (base, _request) = serve_once(404, r#"{"error":"not found"}"#).await;
        let client = DexScreenerClient::new(format!("{}/", base)).unwrap();

        assert!(client.fetch_snapshot("0xA").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_500_is_no_data() {
        let (base, _request) = serve_once(500, "oops").await;
        let client = DexScreenerClient::new(format!("{}/", base)).unwrap();

        assert!(client.fetch_snapshot("0xA").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_connection_refused_is_no_data() {
        let client = DexScreenerClient::with_timeout("http://127.0.0.1:1/", Duration::from_secs(2)).unwrap();
        assert!(client.fetch_snapshot("0xA").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let (base, _request) = serve_once(200, "<html>not json</html>").await;
        let client = DexScreenerClient::new(format!("{}/", base)).unwrap();

        let err = client.fetch_snapshot("0xA").await.unwrap_err();
        assert!(matches!(err, MarketDataError::Decode { .. }));
    }
}
