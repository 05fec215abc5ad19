//! Token Evaluation Pipeline
//!
//! Runs one token through `Fetch -> Parse -> ReputationCheck -> BundlingCheck
//! -> Persist`. Stages are strictly sequential; the first gate that fails
//! ends the evaluation and nothing after it runs.

use std::fmt;
use chrono::Utc;
use thiserror::Error;

use crate::domain::blacklist::BlacklistChange;
use crate::domain::bundling::{BundlingDetector, BundlingVerdict};
use crate::domain::token::{is_empty_snapshot, parse_snapshot, SnapshotError, TokenRecord};
use crate::ports::{
    BlacklistError, BlacklistPort, MarketDataError, MarketDataPort, ReputationPort, StoreError,
    TokenStore,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
    #[error("Malformed snapshot for {address}: {source}")]
    Snapshot {
        address: String,
        source: SnapshotError,
    },
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Blacklist error: {0}")]
    Blacklist(#[from] BlacklistError),
}

/// Pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Fetch,
    Parse,
    ReputationCheck,
    BundlingCheck,
    Persist,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Fetch => "fetch",
            PipelineStage::Parse => "parse",
            PipelineStage::ReputationCheck => "reputation",
            PipelineStage::BundlingCheck => "bundling",
            PipelineStage::Persist => "persist",
        };
        f.write_str(name)
    }
}

/// Terminal outcome of evaluating one token
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Passed every gate and was written to the store
    Persisted(TokenRecord),
    /// Market data API returned nothing usable
    RejectedNoData,
    /// Reputation service did not report "Good"
    RejectedReputation { status: String },
    /// Market cap / liquidity ratio too high; token and developer blacklisted
    RejectedBundled { ratio: f64, change: BlacklistChange },
}

impl Outcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Outcome::Persisted(_))
    }

    /// Stage that produced this outcome
    pub fn stage(&self) -> PipelineStage {
        match self {
            Outcome::Persisted(_) => PipelineStage::Persist,
            Outcome::RejectedNoData => PipelineStage::Fetch,
            Outcome::RejectedReputation { .. } => PipelineStage::ReputationCheck,
            Outcome::RejectedBundled { .. } => PipelineStage::BundlingCheck,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Persisted(_) => write!(f, "saved to database"),
            Outcome::RejectedNoData => write!(f, "no market data"),
            Outcome::RejectedReputation { status } => {
                write!(f, "not marked 'Good' on RugCheck (status: {})", status)
            }
            Outcome::RejectedBundled { ratio, .. } => {
                write!(f, "bundled supply (mcap/liquidity {:.1}), blacklisted", ratio)
            }
        }
    }
}

pub struct TokenPipeline<M, R, S, B> {
    market_data: M,
    reputation: R,
    store: S,
    blacklist: B,
    bundling: BundlingDetector,
}

impl<M, R, S, B> TokenPipeline<M, R, S, B>
where
    M: MarketDataPort,
    R: ReputationPort,
    S: TokenStore,
    B: BlacklistPort,
{
    pub fn new(market_data: M, reputation: R, store: S, blacklist: B) -> Self {
        Self {
            market_data,
            reputation,
            store,
            blacklist,
            bundling: BundlingDetector::default(),
        }
    }

    /// Use a non-default bundling threshold
    pub fn with_bundling_detector(mut self, bundling: BundlingDetector) -> Self {
        self.bundling = bundling;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn blacklist(&self) -> &B {
        &self.blacklist
    }

    /// Evaluate a single token
    pub async fn evaluate(&mut self, token_address: &str) -> Result<Outcome, PipelineError> {
        tracing::debug!("[{}] {}", PipelineStage::Fetch, token_address);
        let body = match self.market_data.fetch_snapshot(token_address).await? {
            Some(body) if !is_empty_snapshot(&body) => body,
            _ => {
                tracing::warn!("Failed to process token data for {}", token_address);
                return Ok(Outcome::RejectedNoData);
            }
        };

        tracing::debug!("[{}] {}", PipelineStage::Parse, token_address);
        let record = parse_snapshot(&body, Utc::now()).map_err(|source| PipelineError::Snapshot {
            address: token_address.to_string(),
            source,
        })?;

        // Reputation is looked up by the requested address, not the one echoed in the snapshot
        tracing::debug!("[{}] {}", PipelineStage::ReputationCheck, token_address);
        let reputation = self.reputation.check(token_address).await;
        if !reputation.is_good() {
            tracing::info!(
                "Token {} is not marked as 'Good' on RugCheck (status: {})",
                token_address,
                reputation
            );
            return Ok(Outcome::RejectedReputation {
                status: reputation.status().to_string(),
            });
        }

        tracing::debug!("[{}] {}", PipelineStage::BundlingCheck, token_address);
        if let BundlingVerdict::Bundled { ratio } = self.bundling.check_token(&record) {
            tracing::info!(
                "Token {} has bundled supply (ratio {:.2} > {}). Blacklisting token and developer {}",
                token_address,
                ratio,
                self.bundling.max_ratio,
                record.developer_address
            );
            let change = self
                .blacklist
                .blacklist(token_address, &record.developer_address)?;
            return Ok(Outcome::RejectedBundled { ratio, change });
        }

        tracing::debug!("[{}] {}", PipelineStage::Persist, token_address);
        self.store.upsert(&record)?;
        tracing::info!(
            "Token {} saved to database (age {} days)",
            token_address,
            record.token_age_days
        );
        Ok(Outcome::Persisted(record))
    }

    /// Evaluate several tokens one after another, stopping at the first fatal error
    pub async fn evaluate_all<I, A>(&mut self, addresses: I) -> Result<Vec<(String, Outcome)>, PipelineError>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        let mut outcomes = Vec::new();
        for address in addresses {
            let address = address.as_ref();
            let outcome = self.evaluate(address).await?;
            outcomes.push((address.to_string(), outcome));
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reputation::Reputation;
    use crate::ports::blacklist::MockBlacklistPort;
    use crate::ports::market_data::MockMarketDataPort;
    use crate::ports::reputation::MockReputationPort;
    use crate::ports::store::MockTokenStore;
    use mockall::predicate::eq;
    use serde_json::{json, Value};

    fn snapshot(liquidity: f64, market_cap: f64) -> Value {
        json!({
            "address": "0xToken",
            "price": 0.01,
            "volume": 5000.0,
            "liquidity": liquidity,
            "marketCap": market_cap,
            "pairCreatedAt": 1_700_000_000_000i64,
            "developerAddress": "0xDev"
        })
    }

    fn market_data_returning(body: Option<Value>) -> MockMarketDataPort {
        let mut mock = MockMarketDataPort::new();
        mock.expect_fetch_snapshot()
            .with(eq("0xToken"))
            .times(1)
            .returning(move |_| Ok(body.clone()));
        mock
    }

    fn reputation_returning(verdict: Reputation) -> MockReputationPort {
        let mut mock = MockReputationPort::new();
        mock.expect_check()
            .with(eq("0xToken"))
            .times(1)
            .returning(move |_| verdict.clone());
        mock
    }

    fn untouched_reputation() -> MockReputationPort {
        let mut mock = MockReputationPort::new();
        mock.expect_check().times(0);
        mock
    }

    fn untouched_store() -> MockTokenStore {
        let mut mock = MockTokenStore::new();
        mock.expect_upsert().times(0);
        mock
    }

    fn untouched_blacklist() -> MockBlacklistPort {
        let mut mock = MockBlacklistPort::new();
        mock.expect_blacklist().times(0);
        mock
    }

    #[tokio::test]
    async fn test_good_and_unbundled_is_persisted() {
        let mut store = MockTokenStore::new();
        store
            .expect_upsert()
            .withf(|r: &TokenRecord| r.token_address == "0xToken" && r.market_cap == 50_000.0)
            .times(1)
            .returning(|_| Ok(()));

        let mut pipeline = TokenPipeline::new(
            market_data_returning(Some(snapshot(1000.0, 50_000.0))),
            reputation_returning(Reputation::Good),
            store,
            untouched_blacklist(),
        );

        let outcome = pipeline.evaluate("0xToken").await.unwrap();
        assert!(outcome.is_persisted());
        assert_eq!(outcome.stage(), PipelineStage::Persist);
    }

    #[tokio::test]
    async fn test_bundled_is_blacklisted_not_persisted() {
        let mut blacklist = MockBlacklistPort::new();
        blacklist
            .expect_blacklist()
            .with(eq("0xToken"), eq("0xDev"))
            .times(1)
            .returning(|_, _| {
                Ok(BlacklistChange {
                    token_added: true,
                    developer_added: true,
                })
            });

        let mut pipeline = TokenPipeline::new(
            market_data_returning(Some(snapshot(1000.0, 200_000.0))),
            reputation_returning(Reputation::Good),
            untouched_store(),
            blacklist,
        );

        let outcome = pipeline.evaluate("0xToken").await.unwrap();
        match outcome {
            Outcome::RejectedBundled { ratio, change } => {
                assert_eq!(ratio, 200.0);
                assert!(change.token_added && change.developer_added);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_risky_halts_before_bundling() {
        let mut pipeline = TokenPipeline::new(
            // Bundled snapshot: would be blacklisted if the bundling gate ran
            market_data_returning(Some(snapshot(1000.0, 200_000.0))),
            reputation_returning(Reputation::risky()),
            untouched_store(),
            untouched_blacklist(),
        );

        let outcome = pipeline.evaluate("0xToken").await.unwrap();
        assert_eq!(
            outcome,
            Outcome::RejectedReputation {
                status: "Risky".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_no_data_halts_immediately() {
        let mut pipeline = TokenPipeline::new(
            market_data_returning(None),
            untouched_reputation(),
            untouched_store(),
            untouched_blacklist(),
        );

        let outcome = pipeline.evaluate("0xToken").await.unwrap();
        assert_eq!(outcome, Outcome::RejectedNoData);
        assert_eq!(outcome.stage(), PipelineStage::Fetch);
    }

    #[tokio::test]
    async fn test_empty_body_is_no_data() {
        for body in [json!({}), json!([]), Value::Null] {
            let mut pipeline = TokenPipeline::new(
                market_data_returning(Some(body.clone())),
                untouched_reputation(),
                untouched_store(),
                untouched_blacklist(),
            );

            let outcome = pipeline.evaluate("0xToken").await.unwrap();
            assert_eq!(outcome, Outcome::RejectedNoData, "body={}", body);
        }
    }

    #[tokio::test]
    async fn test_nan_liquidity_is_fatal_not_clear() {
        let mut body = snapshot(1000.0, 1e12);
        body["liquidity"] = json!("NaN");

        let mut pipeline = TokenPipeline::new(
            market_data_returning(Some(body)),
            untouched_reputation(),
            untouched_store(),
            untouched_blacklist(),
        );

        let err = pipeline.evaluate("0xToken").await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Snapshot {
                source: SnapshotError::Malformed { field: "liquidity", .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_fatal() {
        let mut body = snapshot(1000.0, 50_000.0);
        body.as_object_mut().unwrap().remove("liquidity");

        let mut pipeline = TokenPipeline::new(
            market_data_returning(Some(body)),
            untouched_reputation(),
            untouched_store(),
            untouched_blacklist(),
        );

        let err = pipeline.evaluate("0xToken").await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Snapshot {
                source: SnapshotError::MissingField("liquidity"),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_zero_liquidity_is_persisted() {
        let mut store = MockTokenStore::new();
        store.expect_upsert().times(1).returning(|_| Ok(()));

        let mut pipeline = TokenPipeline::new(
            market_data_returning(Some(snapshot(0.0, 1e12))),
            reputation_returning(Reputation::Good),
            store,
            untouched_blacklist(),
        );

        assert!(pipeline.evaluate("0xToken").await.unwrap().is_persisted());
    }

    #[tokio::test]
    async fn test_custom_threshold_applies() {
        let mut blacklist = MockBlacklistPort::new();
        blacklist
            .expect_blacklist()
            .times(1)
            .returning(|_, _| Ok(BlacklistChange::default()));

        let mut pipeline = TokenPipeline::new(
            market_data_returning(Some(snapshot(1000.0, 50_000.0))),
            reputation_returning(Reputation::Good),
            untouched_store(),
            blacklist,
        )
        .with_bundling_detector(BundlingDetector::with_max_ratio(20.0));

        let outcome = pipeline.evaluate("0xToken").await.unwrap();
        assert_eq!(outcome.stage(), PipelineStage::BundlingCheck);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let mut store = MockTokenStore::new();
        store
            .expect_upsert()
            .times(1)
            .returning(|_| Err(StoreError::LockPoisoned));

        let mut pipeline = TokenPipeline::new(
            market_data_returning(Some(snapshot(1000.0, 50_000.0))),
            reputation_returning(Reputation::Good),
            store,
            untouched_blacklist(),
        );

        let err = pipeline.evaluate("0xToken").await.unwrap_err();
        assert!(matches!(err, PipelineError::Store(StoreError::LockPoisoned)));
    }

    #[test]
    fn test_stage_order() {
        assert!(PipelineStage::Fetch < PipelineStage::Parse);
        assert!(PipelineStage::Parse < PipelineStage::ReputationCheck);
        assert!(PipelineStage::ReputationCheck < PipelineStage::BundlingCheck);
        assert!(PipelineStage::BundlingCheck < PipelineStage::Persist);
    }

    #[test]
    fn test_outcome_display() {
        let outcome = Outcome::RejectedReputation { status: "Danger".into() };
        assert_eq!(outcome.to_string(), "not marked 'Good' on RugCheck (status: Danger)");
        assert_eq!(Outcome::RejectedNoData.to_string(), "no market data");
    }
}
