//! Rug Check Reputation Client
//!
//! Queries `{base_url}/check?token={address}` and reads the `status` field.
//! Fails closed: HTTP errors, non-200 responses and undecodable bodies all
//! yield the "Risky" verdict.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::adapters::DEFAULT_HTTP_TIMEOUT_SECS;
use crate::domain::reputation::Reputation;
use crate::ports::reputation::ReputationPort;

#[derive(Debug, Error)]
pub enum RugCheckError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Unexpected status: {0}")]
    BadStatus(StatusCode),
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RugCheckClient {
    http: Client,
    base_url: String,
}

impl RugCheckClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RugCheckError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RugCheckError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: base_url.into() })
    }

    pub fn check_url(&self, token_address: &str) -> String {
        format!("{}/check?token={}", self.base_url, token_address)
    }

    /// Raw status lookup; `Ok(None)` when the body has no `status` field
    pub async fn fetch_status(&self, token_address: &str) -> Result<Option<String>, RugCheckError> {
        let response = self.http.get(self.check_url(token_address)).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RugCheckError::BadStatus(status));
        }

        let body: CheckResponse = response.json().await?;
        Ok(body.status)
    }
}

#[async_trait]
impl ReputationPort for RugCheckClient {
    async fn check(&self, token_address: &str) -> Reputation {
        match self.fetch_status(token_address).await {
            Ok(status) => Reputation::from_status(status.as_deref()),
            Err(RugCheckError::BadStatus(code)) => {
                tracing::warn!(
                    "Failed to fetch RugCheck data for token {}: HTTP {}",
                    token_address,
                    code
                );
                Reputation::risky()
            }
            Err(e) => {
                tracing::warn!("Error checking RugCheck status for {}: {}", token_address, e);
                Reputation::risky()
            }
        }
    }
}
