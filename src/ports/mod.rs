//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Market data snapshots (DEX API)
//! - Reputation lookups (rug check service)
//! - Token persistence (SQLite)
//! - Blacklist persistence (config file)

pub mod market_data;
pub mod reputation;
pub mod store;
pub mod blacklist;
pub mod mocks;

pub use market_data::{MarketDataPort, MarketDataError};
pub use reputation::ReputationPort;
pub use store::{TokenStore, StoredToken, StoreError};
pub use blacklist::{BlacklistPort, BlacklistError};
