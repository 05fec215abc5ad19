//! DEX Screener Adapter
//!
//! Market data source for token snapshots (price, volume, liquidity,
//! market cap, pair creation time, developer address).

mod client;

pub use client::DexScreenerClient;
