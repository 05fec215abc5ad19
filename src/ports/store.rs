//! Token Store Port
//!
//! Keyed persistence for accepted tokens. One row per token address;
//! writing an existing address replaces the previous row.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::token::TokenRecord;

#[cfg(test)]
use mockall::automock;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Row as persisted (token age is not stored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub token_address: String,
    pub price: f64,
    pub volume: f64,
    pub liquidity: f64,
    pub market_cap: f64,
    /// ISO-8601 text
    pub pair_created_at: String,
    pub developer_address: String,
}

impl From<&TokenRecord> for StoredToken {
    fn from(record: &TokenRecord) -> Self {
        Self {
            token_address: record.token_address.clone(),
            price: record.price,
            volume: record.volume,
            liquidity: record.liquidity,
            market_cap: record.market_cap,
            pair_created_at: record.pair_created_at_iso(),
            developer_address: record.developer_address.clone(),
        }
    }
}

#[cfg_attr(test, automock)]
pub trait TokenStore: Send + Sync {
    /// Insert or replace the row keyed by `record.token_address`
    fn upsert(&self, record: &TokenRecord) -> Result<(), StoreError>;

    fn get(&self, token_address: &str) -> Result<Option<StoredToken>, StoreError>;

    fn count(&self) -> Result<u64, StoreError>;
}
