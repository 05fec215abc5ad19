//! token-sentry - Token Safety Gate Library
//!
//! Evaluates a token against a reputation lookup and a bundled-supply
//! heuristic, then either stores it or blacklists it.
//!
//! # Modules
//!
//! - `domain`: Core logic (TokenRecord parsing, Reputation, BundlingDetector, Blacklist)
//! - `ports`: Trait abstractions (MarketDataPort, ReputationPort, TokenStore, BlacklistPort)
//! - `adapters`: External implementations (DEX Screener, Rug Check, SQLite, CLI)
//! - `config`: Configuration loading, validation and rewriting
//! - `application`: The evaluation pipeline and config-backed blacklist

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
