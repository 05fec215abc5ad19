//! CLI Adapter
//!
//! Command-line interface for token-sentry.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, CheckCmd, ShowCmd, BlacklistCmd, PLACEHOLDER_TOKEN_ADDRESS};
