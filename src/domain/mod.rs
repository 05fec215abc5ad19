//! Domain Layer - Core business logic for token-sentry
//!
//! This module contains pure domain types and logic with no network or disk
//! access. All external interactions happen through the ports layer.
//!
//! - `token`: Raw snapshot parsing into `TokenRecord`
//! - `reputation`: Interpretation of the reputation service status
//! - `bundling`: Market cap / liquidity ratio heuristic
//! - `blacklist`: Ordered, de-duplicated deny-lists

pub mod token;
pub mod reputation;
pub mod bundling;
pub mod blacklist;

pub use token::{is_empty_snapshot, parse_snapshot, RawSnapshot, SnapshotError, TokenRecord, UNKNOWN_DEVELOPER};
pub use reputation::{Reputation, GOOD_STATUS, DEFAULT_STATUS};
pub use bundling::{BundlingDetector, BundlingVerdict, DEFAULT_MAX_MCAP_LIQUIDITY_RATIO};
pub use blacklist::{Blacklist, BlacklistChange};
