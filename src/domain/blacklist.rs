//! Blacklist
//!
//! Deny-list of token and developer addresses. Stored as ordered lists in the
//! config file; insertion keeps set semantics (no duplicates, first-seen order).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blacklist {
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default)]
    pub developers: Vec<String>,
}

/// Entries newly added by a single blacklist update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlacklistChange {
    pub token_added: bool,
    pub developer_added: bool,
}

impl BlacklistChange {
    pub fn is_empty(&self) -> bool {
        !self.token_added && !self.developer_added
    }
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token address. Returns false if it was already present.
    pub fn add_token(&mut self, token: &str) -> bool {
        push_unique(&mut self.tokens, token)
    }

    /// Add a developer address. Returns false if it was already present.
    pub fn add_developer(&mut self, developer: &str) -> bool {
        push_unique(&mut self.developers, developer)
    }

    /// Blacklist a token together with its developer
    pub fn add(&mut self, token: &str, developer: &str) -> BlacklistChange {
        BlacklistChange {
            token_added: self.add_token(token),
            developer_added: self.add_developer(developer),
        }
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn contains_developer(&self, developer: &str) -> bool {
        self.developers.iter().any(|d| d == developer)
    }
}

fn push_unique(list: &mut Vec<String>, entry: &str) -> bool {
    if list.iter().any(|e| e == entry) {
        return false;
    }
    list.push(entry.to_string());
    true
}
