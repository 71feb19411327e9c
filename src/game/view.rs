//! Render-ready view of the board.
//!
//! Frontends draw a `BoardView` and send back `Action`s; they never read
//! controller internals. All copy shown to the player lives here.

use serde::Serialize;

use super::controller::MemoryGame;
use super::phase::{GamePhase, Overlay};
use crate::core::Action;

const HELP_BODY: &str = "Find matching pairs of space objects by flipping cards two at a time. \
Remember their positions and match all pairs to win!";

/// One tile in the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView<'a> {
    pub position: usize,
    /// Face showing (face-up or matched).
    pub revealed: bool,
    pub image_source: &'a str,
    pub alt_text: &'a str,
    /// The tile ignores clicks.
    pub disabled: bool,
    /// e.g. "Mars card hidden".
    pub aria_label: String,
}

/// Icon for a control button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ControlIcon {
    Pause,
    Play,
    Refresh,
    Help,
}

/// A control button above the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ControlView {
    pub action: Action,
    pub icon: ControlIcon,
    pub aria_label: &'static str,
    pub enabled: bool,
}

/// The pause/resume, reset and help buttons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ControlsView {
    pub pause: ControlView,
    pub reset: ControlView,
    pub help: ControlView,
}

/// The overlay's primary button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OverlayButton {
    pub label: &'static str,
    pub action: Action,
}

/// Modal content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OverlayView {
    pub kind: Overlay,
    pub title: &'static str,
    pub body: String,
    /// Small print under the body.
    pub note: Option<&'static str>,
    /// `None` for overlays the player cannot dismiss.
    pub button: Option<OverlayButton>,
}

/// Everything a frontend needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardView<'a> {
    pub columns: usize,
    pub cards: Vec<CardView<'a>>,
    pub controls: ControlsView,
    pub overlay: Option<OverlayView>,
}

impl BoardView<'_> {
    /// Grid rows needed for all cards.
    #[must_use]
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            return 0;
        }
        self.cards.len().div_ceil(self.columns)
    }
}

impl MemoryGame {
    /// Build the render view for the current state.
    #[must_use]
    pub fn view(&self) -> BoardView<'_> {
        let cards = self
            .deck()
            .iter()
            .map(|card| {
                let (image_source, alt_text) = self
                    .catalog()
                    .get(card.item_id)
                    .map_or(("", ""), |item| (item.src.as_str(), item.alt.as_str()));
                let revealed = card.is_revealed();
                CardView {
                    position: card.position,
                    revealed,
                    image_source,
                    alt_text,
                    disabled: self.click_guard(card.position).is_some(),
                    aria_label: format!("{} card {}", alt_text, if revealed { "revealed" } else { "hidden" }),
                }
            })
            .collect();

        BoardView {
            columns: self.config().columns,
            cards,
            controls: self.controls_view(),
            overlay: self.overlay().map(|kind| self.overlay_view(kind)),
        }
    }

    fn controls_view(&self) -> ControlsView {
        let paused = self.is_paused();
        ControlsView {
            pause: ControlView {
                action: Action::TogglePause,
                icon: if paused { ControlIcon::Play } else { ControlIcon::Pause },
                aria_label: if paused { "Resume game" } else { "Pause game" },
                enabled: self.is_started(),
            },
            reset: ControlView {
                action: Action::Reset,
                icon: ControlIcon::Refresh,
                aria_label: "Reset game",
                enabled: true,
            },
            help: ControlView {
                action: Action::ShowHelp,
                icon: ControlIcon::Help,
                aria_label: "Show help",
                enabled: self.phase() != GamePhase::Won,
            },
        }
    }

    fn overlay_view(&self, kind: Overlay) -> OverlayView {
        let (title, body, note, label) = match kind {
            Overlay::Start => (
                "Memorize the Cards!",
                format!(
                    "You have {} to memorize the positions of all cards before they flip over.",
                    format_seconds(self.config().memorize_ms)
                ),
                Some("Game will start automatically..."),
                None,
            ),
            Overlay::Pause => (
                "Game Paused",
                "Take a break! Click the pause button to resume.".to_string(),
                None,
                Some("Resume"),
            ),
            Overlay::Help => ("How to Play", HELP_BODY.to_string(), None, Some("Got it!")),
            Overlay::Win => (
                "Congratulations!",
                "You've matched all the pairs and won the game!".to_string(),
                None,
                Some("Play Again"),
            ),
        };

        OverlayView {
            kind,
            title,
            body,
            note,
            button: label.map(|label| OverlayButton {
                label,
                action: Action::DismissOverlay,
            }),
        }
    }
}

/// "5 seconds", "1 second", "2.5 seconds".
fn format_seconds(ms: u64) -> String {
    if ms == 1000 {
        return "1 second".to_string();
    }
    format!("{} seconds", ms as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MemoryGameBuilder;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(5000), "5 seconds");
        assert_eq!(format_seconds(1000), "1 second");
        assert_eq!(format_seconds(2500), "2.5 seconds");
    }

    #[test]
    fn test_start_view() {
        let game = MemoryGameBuilder::new().seed(1).build().unwrap();
        let view = game.view();

        assert_eq!(view.columns, 4);
        assert_eq!(view.rows(), 4);
        assert!(view.cards.iter().all(|c| c.revealed && c.disabled));
        assert!(view.cards[0].aria_label.ends_with("card revealed"));
        assert!(!view.controls.pause.enabled);

        let overlay = view.overlay.unwrap();
        assert_eq!(overlay.kind, Overlay::Start);
        assert_eq!(overlay.title, "Memorize the Cards!");
        assert!(overlay.body.contains("5 seconds"));
        assert!(overlay.button.is_none());
    }

    #[test]
    fn test_playing_view() {
        let mut game = MemoryGameBuilder::new().seed(1).build().unwrap();
        game.run_until_idle();
        let view = game.view();

        assert!(view.overlay.is_none());
        assert!(view.cards.iter().all(|c| !c.revealed && !c.disabled));
        assert!(view.cards.iter().all(|c| c.aria_label.ends_with("card hidden")));
        assert!(view.controls.pause.enabled);
        assert_eq!(view.controls.pause.icon, ControlIcon::Pause);

        let card = &view.cards[0];
        let item = game.catalog().get(game.deck()[0].item_id).unwrap();
        assert_eq!(card.image_source, item.src);
        assert_eq!(card.alt_text, item.alt);
    }

    #[test]
    fn test_paused_view() {
        let mut game = MemoryGameBuilder::new().seed(1).build().unwrap();
        game.run_until_idle();
        game.toggle_pause();
        let view = game.view();

        assert!(view.cards.iter().all(|c| c.disabled));
        assert_eq!(view.controls.pause.aria_label, "Resume game");
        assert_eq!(view.controls.pause.icon, ControlIcon::Play);

        let overlay = view.overlay.unwrap();
        assert_eq!(overlay.title, "Game Paused");
        assert_eq!(overlay.button.unwrap().label, "Resume");
    }

    #[test]
    fn test_full_selection_disables_every_card() {
        let mut game = MemoryGameBuilder::new().seed(1).build().unwrap();
        game.run_until_idle();
        let first = game.deck()[0];
        let other = game.deck().iter().find(|c| c.item_id != first.item_id).unwrap().position;
        game.handle_card_click(first.position);
        game.handle_card_click(other);

        assert!(game.view().cards.iter().all(|c| c.disabled));

        game.advance(game.config().mismatch_delay_ms);
        assert!(game.view().cards.iter().all(|c| !c.disabled));
    }

    #[test]
    fn test_help_view() {
        let mut game = MemoryGameBuilder::new().seed(1).build().unwrap();
        game.show_help();
        let overlay = game.view().overlay.unwrap();

        assert_eq!(overlay.title, "How to Play");
        assert_eq!(
            overlay.button,
            Some(OverlayButton {
                label: "Got it!",
                action: Action::DismissOverlay
            })
        );
    }

    #[test]
    fn test_view_serializes() {
        let game = MemoryGameBuilder::new().seed(1).build().unwrap();
        let json = serde_json::to_value(game.view()).unwrap();
        assert_eq!(json["cards"].as_array().unwrap().len(), 16);
        assert_eq!(json["overlay"]["kind"], "Start");
    }
}
