//! Reputation Port
//!
//! External trust-score lookup. Implementations never fail: any error is
//! folded into a not-good verdict.

use async_trait::async_trait;

use crate::domain::reputation::Reputation;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReputationPort: Send + Sync {
    async fn check(&self, token_address: &str) -> Reputation;
}
