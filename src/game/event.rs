//! Game events.
//!
//! Every state transition records an event. Frontends drain them to drive
//! flip animations and sounds instead of diffing the board.

use serde::{Deserialize, Serialize};

use super::phase::Overlay;
use crate::cards::ItemId;

/// Something that happened on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh deck was dealt face-up.
    DeckDealt { card_count: usize, seed: u64 },

    /// The reveal timer removed the start overlay.
    StartOverlayCleared,

    /// The memorize phase ended and unmatched cards flipped face-down.
    CardsHidden { count: usize },

    /// A card was clicked face-up.
    CardFlipped { position: usize },

    /// Two selected cards matched.
    PairMatched { item: ItemId, positions: [usize; 2] },

    /// Two selected cards differ; they flip back after the mismatch delay.
    PairMismatched { positions: [usize; 2] },

    /// A mismatched pair turned face-down again.
    CardsFlippedBack { positions: [usize; 2] },

    Paused,

    Resumed,

    HelpShown,

    /// The player pressed an overlay's button.
    OverlayDismissed(Overlay),

    /// All pairs found.
    Won,
}
