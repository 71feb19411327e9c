//! Game configuration.
//!
//! Timings and board size are configuration, not constants. The defaults
//! reproduce the classic game: 8 pairs on a 4-column grid, 5 seconds to
//! memorize, half a second before the cards hide, and one second to look
//! at a mismatched pair.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::Catalog;

/// Default number of pairs on the board.
pub const DEFAULT_PAIR_COUNT: usize = 8;

/// Game configuration.
///
/// Missing fields fall back to their defaults when deserialized:
///
/// ```
/// use space_memory::core::GameConfig;
///
/// let config = GameConfig::from_json(r#"{ "pair_count": 6 }"#).unwrap();
/// assert_eq!(config.pair_count, 6);
/// assert_eq!(config.memorize_ms, 5000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of distinct items dealt; the deck holds twice as many cards.
    pub pair_count: usize,

    /// How long every card stays face-up after a deal.
    pub memorize_ms: u64,

    /// Gap between the start overlay clearing and the cards hiding.
    pub hide_delay_ms: u64,

    /// How long a mismatched pair stays visible before flipping back.
    pub mismatch_delay_ms: u64,

    /// Grid width for rendering.
    pub columns: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            memorize_ms: 5000,
            hide_delay_ms: 500,
            mismatch_delay_ms: 1000,
            columns: 4,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the pair count.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Set all three reveal/mismatch timings at once.
    #[must_use]
    pub fn with_timings(mut self, memorize_ms: u64, hide_delay_ms: u64, mismatch_delay_ms: u64) -> Self {
        self.memorize_ms = memorize_ms;
        self.hide_delay_ms = hide_delay_ms;
        self.mismatch_delay_ms = mismatch_delay_ms;
        self
    }

    /// Total cards on the board.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.pair_count * 2
    }

    /// Check this configuration against the catalog it will deal from.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        if self.pair_count == 0 {
            return Err(ConfigError::EmptyGame);
        }
        if catalog.len() < self.pair_count {
            return Err(ConfigError::CatalogTooSmall {
                required: self.pair_count,
                available: catalog.len(),
            });
        }
        Ok(())
    }
}
