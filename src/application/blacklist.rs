//! Config-file Blacklist
//!
//! Owns the loaded `Config` and rewrites the config file every time an entry
//! is blacklisted. Single writer only: the read-modify-write is not guarded
//! against another process editing the same file.

use std::path::PathBuf;

use crate::config::{save_config, Config};
use crate::domain::blacklist::BlacklistChange;
use crate::ports::blacklist::{BlacklistError, BlacklistPort};

#[derive(Debug, Clone)]
pub struct ConfigBlacklist {
    config: Config,
    path: PathBuf,
}

impl ConfigBlacklist {
    pub fn new(config: Config, path: impl Into<PathBuf>) -> Self {
        Self { config, path: path.into() }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl BlacklistPort for ConfigBlacklist {
    fn blacklist(
        &mut self,
        token_address: &str,
        developer_address: &str,
    ) -> Result<BlacklistChange, BlacklistError> {
        let change = self.config.blacklist.add(token_address, developer_address);
        save_config(&self.config, &self.path)?;

        tracing::info!(
            "Blacklist updated (token added: {}, developer added: {}) -> {}",
            change.token_added,
            change.developer_added,
            self.path.display()
        );
        Ok(change)
    }
}
