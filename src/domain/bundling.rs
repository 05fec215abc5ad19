//! Bundled Supply Detector
//!
//! Flags tokens whose market cap is far out of proportion to the liquidity
//! backing it. A high market-cap/liquidity ratio suggests the supply is held
//! in a few wallets and could not be sold into the pool.

use serde::{Deserialize, Serialize};

use super::token::TokenRecord;

/// Default maximum market cap / liquidity ratio before a token counts as bundled
pub const DEFAULT_MAX_MCAP_LIQUIDITY_RATIO: f64 = 100.0;

/// Result of a bundling check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BundlingVerdict {
    /// Ratio at or below the threshold
    Clear { ratio: f64 },
    /// Ratio strictly above the threshold
    Bundled { ratio: f64 },
    /// Liquidity is zero or negative, ratio undefined
    NoLiquidity,
}

impl BundlingVerdict {
    pub fn is_bundled(&self) -> bool {
        matches!(self, BundlingVerdict::Bundled { .. })
    }

    /// The computed ratio, if liquidity was positive
    pub fn ratio(&self) -> Option<f64> {
        match self {
            BundlingVerdict::Clear { ratio } | BundlingVerdict::Bundled { ratio } => Some(*ratio),
            BundlingVerdict::NoLiquidity => None,
        }
    }
}

/// Market cap / liquidity heuristic
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BundlingDetector {
    /// Ratio above which supply is considered bundled (default: 100)
    pub max_ratio: f64,
}

impl Default for BundlingDetector {
    fn default() -> Self {
        Self {
            max_ratio: DEFAULT_MAX_MCAP_LIQUIDITY_RATIO,
        }
    }
}

impl BundlingDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_ratio(max_ratio: f64) -> Self {
        Self { max_ratio }
    }

    /// Check a raw (liquidity, market cap) pair.
    ///
    /// Non-positive liquidity short-circuits to `NoLiquidity`, which is never
    /// treated as bundled.
    pub fn check(&self, liquidity: f64, market_cap: f64) -> BundlingVerdict {
        if liquidity <= 0.0 {
            return BundlingVerdict::NoLiquidity;
        }

        let ratio = market_cap / liquidity;
        if ratio > self.max_ratio {
            BundlingVerdict::Bundled { ratio }
        } else {
            BundlingVerdict::Clear { ratio }
        }
    }

    pub fn check_token(&self, token: &TokenRecord) -> BundlingVerdict {
        self.check(token.liquidity, token.market_cap)
    }
}
