//! Game phase and overlay state.
//!
//! The phase says what the player can do; the overlay says which modal is
//! drawn on top. They are separate fields but only some pairings are
//! reachable, checked by [`is_consistent`].

use serde::{Deserialize, Serialize};

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Cards are face-up for the player to memorize.
    Memorizing,
    /// Cards are face-down and clickable.
    Playing,
    /// Play is suspended behind the pause or help overlay.
    Paused,
    /// Every pair has been found.
    Won,
}

impl GamePhase {
    /// Started games accept pause toggles. Won games are not started.
    #[must_use]
    pub fn is_started(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Paused)
    }

    #[must_use]
    pub fn is_paused(self) -> bool {
        self == GamePhase::Paused
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Memorizing => "memorize",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::Won => "won",
        };
        f.write_str(name)
    }
}

/// Modal shown over the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Overlay {
    /// "Memorize the Cards!" - cleared only by the reveal timer.
    Start,
    /// "Game Paused".
    Pause,
    /// "How to Play".
    Help,
    /// "Congratulations!".
    Win,
}

impl Overlay {
    /// Whether the overlay has a button the player can press.
    #[must_use]
    pub fn is_dismissible(self) -> bool {
        self != Overlay::Start
    }
}

impl std::fmt::Display for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Overlay::Start => "start",
            Overlay::Pause => "pause",
            Overlay::Help => "help",
            Overlay::Win => "win",
        };
        f.write_str(name)
    }
}

/// Check that a phase/overlay pairing is one the controller can reach.
#[must_use]
pub fn is_consistent(phase: GamePhase, overlay: Option<Overlay>) -> bool {
    match phase {
        GamePhase::Memorizing => matches!(overlay, None | Some(Overlay::Start) | Some(Overlay::Help)),
        GamePhase::Playing => overlay.is_none(),
        // Dismissing the pause overlay leaves the game paused with nothing shown.
        GamePhase::Paused => matches!(overlay, None | Some(Overlay::Pause) | Some(Overlay::Help)),
        GamePhase::Won => overlay == Some(Overlay::Win),
    }
}
