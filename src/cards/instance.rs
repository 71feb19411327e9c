//! Card instances - runtime card state.
//!
//! A `Card` is one tile on the board. Its position and item never change
//! after a deal; only the `face_up` and `matched` flags mutate.

use serde::{Deserialize, Serialize};

use super::definition::ItemId;

/// A card on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Fixed board slot, `0..card_count`.
    pub position: usize,

    /// Item shown on the card's face. Shared with exactly one other card.
    pub item_id: ItemId,

    /// Is the face showing?
    pub face_up: bool,

    /// Has this card been paired?
    pub matched: bool,
}

impl Card {
    /// Create a face-up, unmatched card (the state right after a deal).
    #[must_use]
    pub fn new(position: usize, item_id: ItemId) -> Self {
        Self {
            position,
            item_id,
            face_up: true,
            matched: false,
        }
    }

    /// Whether the face should be drawn. Matched cards always show.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.face_up || self.matched
    }

    /// Check if this card pairs with another (same item, different slot).
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.item_id == other.item_id && self.position != other.position
    }
}
