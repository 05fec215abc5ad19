//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - DEX Screener: market data snapshots
//! - Rug Check: token reputation lookups
//! - SQLite: token persistence
//! - CLI: Command-line interface definitions

pub mod dexscreener;
pub mod rugcheck;
pub mod sqlite;
pub mod cli;

/// Request timeout shared by the HTTP adapters
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[cfg(test)]
mod test_support;

pub use dexscreener::DexScreenerClient;
pub use rugcheck::RugCheckClient;
pub use sqlite::SqliteTokenStore;
pub use cli::CliApp;
