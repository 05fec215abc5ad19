//! Blacklist Port
//!
//! Sink for blacklisting a token and its developer. The config-file backed
//! implementation lives in `application::blacklist`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::blacklist::BlacklistChange;

#[cfg(test)]
use mockall::automock;

#[derive(Error, Debug)]
pub enum BlacklistError {
    #[error("Failed to persist blacklist: {0}")]
    Persist(#[from] ConfigError),
}

#[cfg_attr(test, automock)]
pub trait BlacklistPort: Send {
    /// Add both addresses (if absent) and persist the result
    fn blacklist(
        &mut self,
        token_address: &str,
        developer_address: &str,
    ) -> Result<BlacklistChange, BlacklistError>;
}
