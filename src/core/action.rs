//! Player inputs.
//!
//! Every input a frontend can send is an `Action`: a card click or one of
//! the control buttons. Actions are plain data so they can be recorded,
//! replayed, or produced by an agent from `MemoryGame::legal_actions`.

use serde::{Deserialize, Serialize};

/// A player input.
///
/// ```
/// use space_memory::core::Action;
///
/// let click = Action::FlipCard(3);
/// assert_eq!(click.position(), Some(3));
/// assert_eq!(Action::Reset.position(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Click the card at a board position.
    FlipCard(usize),
    /// Pause/resume button.
    TogglePause,
    /// Reset button.
    Reset,
    /// Help button.
    ShowHelp,
    /// Overlay's primary button.
    DismissOverlay,
}

impl Action {
    /// Board position for card clicks.
    #[must_use]
    pub fn position(self) -> Option<usize> {
        match self {
            Action::FlipCard(position) => Some(position),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::FlipCard(position) => write!(f, "FlipCard({})", position),
            Action::TogglePause => write!(f, "TogglePause"),
            Action::Reset => write!(f, "Reset"),
            Action::ShowHelp => write!(f, "ShowHelp"),
            Action::DismissOverlay => write!(f, "DismissOverlay"),
        }
    }
}
