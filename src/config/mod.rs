//! Configuration Module
//!
//! Loads, validates and rewrites configuration from JSON files.

pub mod loader;

pub use loader::{
    Config, ConfigError, RiskSection, load_config, save_config, DEFAULT_CONFIG_FILE,
};
