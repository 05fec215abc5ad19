//! Configuration Loader
//!
//! Loads, validates and rewrites the JSON config file. The blacklist lives in
//! the same document, so every blacklist update rewrites the whole file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::blacklist::Blacklist;
use crate::domain::bundling::{BundlingDetector, DEFAULT_MAX_MCAP_LIQUIDITY_RATIO};

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Main configuration structure matching config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Market data endpoint, token address is appended verbatim
    pub dex_api_url: String,
    /// Reputation service base URL (`/check?token=` is appended)
    pub rugcheck_api_url: String,
    /// SQLite database file
    pub database_name: String,
    #[serde(default)]
    pub blacklist: Blacklist,
    /// Optional risk tuning, absent from most config files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskSection>,
    /// Keys this crate does not know about, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Risk tuning section (optional)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSection {
    /// Market cap / liquidity ratio above which supply is bundled
    #[serde(default = "default_max_ratio")]
    pub max_market_cap_to_liquidity_ratio: f64,
}

fn default_max_ratio() -> f64 {
    DEFAULT_MAX_MCAP_LIQUIDITY_RATIO
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Failed to write config file {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path.as_ref())?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    tracing::debug!(
        "Config loaded from {} ({} blacklisted tokens, {} blacklisted developers)",
        path.as_ref().display(),
        config.blacklist.tokens.len(),
        config.blacklist.developers.len()
    );
    Ok(config)
}

/// Rewrite the whole config document.
///
/// Writes a sibling temp file and renames it over the target so a reader never
/// sees a half-written document.
pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let content = config.to_json_pretty()?;

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, content).map_err(|source| ConfigError::WriteError {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::debug!("Config written to {}", path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dex_api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "dex_api_url cannot be empty".to_string(),
            ));
        }

        if self.rugcheck_api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "rugcheck_api_url cannot be empty".to_string(),
            ));
        }

        if self.database_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database_name cannot be empty".to_string(),
            ));
        }

        if let Some(risk) = &self.risk {
            let ratio = risk.max_market_cap_to_liquidity_ratio;
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "max_market_cap_to_liquidity_ratio must be > 0, got {}",
                    ratio
                )));
            }
        }

        Ok(())
    }

    /// Serialize with 4-space indentation, the layout the config file uses
    pub fn to_json_pretty(&self) -> Result<Vec<u8>, ConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }

    /// Get market data URL with environment variable override
    /// Checks DEX_API_URL env var first, falls back to config value
    pub fn get_dex_api_url(&self) -> String {
        std::env::var("DEX_API_URL").unwrap_or_else(|_| self.dex_api_url.clone())
    }

    /// Get reputation service URL with environment variable override
    /// Checks RUGCHECK_API_URL env var first, falls back to config value
    pub fn get_rugcheck_api_url(&self) -> String {
        std::env::var("RUGCHECK_API_URL").unwrap_or_else(|_| self.rugcheck_api_url.clone())
    }

    /// Get database path with environment variable override and `~` expansion
    /// Checks TOKEN_DB_PATH env var first, falls back to config value
    pub fn database_path(&self) -> PathBuf {
        let raw = std::env::var("TOKEN_DB_PATH").unwrap_or_else(|_| self.database_name.clone());
        PathBuf::from(shellexpand::tilde(&raw).into_owned())
    }

    /// Bundling detector configured from the optional risk section
    pub fn bundling_detector(&self) -> BundlingDetector {
        self.risk
            .as_ref()
            .map(|r| BundlingDetector::with_max_ratio(r.max_market_cap_to_liquidity_ratio))
            .unwrap_or_default()
    }
}
