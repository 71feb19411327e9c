//! Configuration errors.
//!
//! Gameplay itself has no error taxonomy: every in-game input is either
//! applied or ignored. Only building a game from configuration can fail.

use thiserror::Error;

use crate::cards::ItemId;

/// Errors raised while loading or validating a game configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A game needs at least one pair.
    #[error("pair_count must be at least 1")]
    EmptyGame,

    /// The catalog cannot supply enough distinct items.
    #[error("catalog has {available} items but {required} pairs were requested")]
    CatalogTooSmall { required: usize, available: usize },

    /// Two catalog entries share an id, so their cards would cross-match.
    #[error("duplicate catalog item id {0}")]
    DuplicateItem(ItemId),

    /// Malformed JSON configuration.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
