//! Market Data Port
//!
//! Source of raw token snapshots. A missing snapshot (`Ok(None)`) is a normal
//! outcome: the pipeline stops for that token without raising an error.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Market data error type
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Failed to decode market data body for {address}: {reason}")]
    Decode { address: String, reason: String },

    #[error("Market data client setup failed: {0}")]
    Client(String),
}

/// Market data port trait
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch the snapshot for a token.
    ///
    /// Returns `Ok(None)` on any non-200 response or transport failure.
    /// A 200 whose body is not JSON is reported as `MarketDataError::Decode`.
    async fn fetch_snapshot(&self, token_address: &str) -> Result<Option<Value>, MarketDataError>;
}
