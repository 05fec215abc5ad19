//! CLI Command Definitions
//!
//! Argument parsing for the token-sentry binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Address evaluated when `check` is run without arguments
pub const PLACEHOLDER_TOKEN_ADDRESS: &str = "0xYourTokenAddressHere";

/// token-sentry - reputation and bundled-supply gate for new tokens
#[derive(Parser, Debug)]
#[command(
    name = "token-sentry",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Reputation and bundled-supply gate for new tokens",
    long_about = "token-sentry fetches a token's market snapshot, rejects it unless the \
                  reputation service reports 'Good', blacklists it when market cap dwarfs \
                  liquidity, and otherwise stores it in a local SQLite database."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one or more tokens
    Check(CheckCmd),

    /// Show a stored token
    Show(ShowCmd),

    /// List blacklisted tokens and developers
    Blacklist(BlacklistCmd),
}

/// Evaluate tokens
#[derive(Parser, Debug)]
pub struct CheckCmd {
    /// Token addresses to evaluate, in order
    #[arg(value_name = "ADDRESS", default_value = PLACEHOLDER_TOKEN_ADDRESS)]
    pub addresses: Vec<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    pub config: PathBuf,
}

/// Show a stored token
#[derive(Parser, Debug)]
pub struct ShowCmd {
    /// Token address
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    pub config: PathBuf,
}

/// List blacklist entries
#[derive(Parser, Debug)]
pub struct BlacklistCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    pub config: PathBuf,
}
