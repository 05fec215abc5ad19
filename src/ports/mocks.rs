use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::reputation::Reputation;

use super::market_data::{MarketDataError, MarketDataPort};
use super::reputation::ReputationPort;

/// Mock market data port that records calls and allows controlled responses.
/// Addresses without a configured snapshot behave like a 404.
#[derive(Debug, Default, Clone)]
pub struct MockMarketData {
    calls: Arc<Mutex<Vec<String>>>,
    responses: Arc<Mutex<HashMap<String, Value>>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the snapshot served for an address
    pub fn with_snapshot(self, address: &str, snapshot: Value) -> Self {
        self.responses.lock().unwrap().insert(address.to_string(), snapshot);
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn fetch_snapshot(&self, token_address: &str) -> Result<Option<Value>, MarketDataError> {
        self.calls.lock().unwrap().push(token_address.to_string());
        Ok(self.responses.lock().unwrap().get(token_address).cloned())
    }
}

/// Mock reputation port. Unconfigured addresses get the fail-closed verdict.
#[derive(Debug, Default, Clone)]
pub struct MockReputation {
    calls: Arc<Mutex<Vec<String>>>,
    statuses: Arc<Mutex<HashMap<String, String>>>,
}

impl MockReputation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the status reported for an address
    pub fn with_status(self, address: &str, status: &str) -> Self {
        self.statuses.lock().unwrap().insert(address.to_string(), status.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReputationPort for MockReputation {
    async fn check(&self, token_address: &str) -> Reputation {
        self.calls.lock().unwrap().push(token_address.to_string());
        let statuses = self.statuses.lock().unwrap();
        Reputation::from_status(statuses.get(token_address).map(String::as_str))
    }
}
