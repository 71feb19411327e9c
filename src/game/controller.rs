//! The memory game controller.
//!
//! `MemoryGame` owns the deck, the selection, the phase/overlay pair and
//! every pending timer. All inputs are synchronous methods; deferred work
//! runs when the host advances the virtual clock.
//!
//! ## Reveal sequence
//!
//! ```text
//! reset ──5000ms──> start overlay cleared ──500ms──> cards hidden, Playing
//! ```
//!
//! Both steps share one tracked handle, so a reset at any point of the
//! sequence cancels whichever step is still pending.

use std::collections::VecDeque;

use smallvec::SmallVec;

use super::event::GameEvent;
use super::phase::{is_consistent, GamePhase, Overlay};
use crate::cards::{Card, Catalog, Deck, ItemId};
use crate::core::{Action, ConfigError, GameConfig, GameRng};
use crate::timers::{Scheduler, TimerId};

/// Events kept before the oldest are dropped.
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Deferred work owned by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GameTimer {
    /// First reveal step: drop the start overlay.
    ClearStartOverlay,
    /// Second reveal step: hide the cards and start play.
    HideCards,
    /// Turn a mismatched pair back face-down.
    FlipBack([usize; 2]),
}

/// Why a card click had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// Still memorizing, or the game is already won.
    NotStarted,
    Paused,
    /// Two cards are face-up awaiting the mismatch flip-back.
    SelectionFull,
    AlreadyMatched,
    /// The card is already selected.
    AlreadyFaceUp,
}

/// Result of a card click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair turned face-up.
    Flipped,
    /// Second card matched the first.
    Matched(ItemId),
    /// Second card differs; both flip back after the mismatch delay.
    Mismatched,
    /// The final pair matched.
    Won,
}

impl ClickOutcome {
    #[must_use]
    pub fn is_ignored(self) -> bool {
        matches!(self, ClickOutcome::Ignored(_))
    }
}

/// Builder for creating a `MemoryGame`.
///
/// ```
/// use space_memory::game::MemoryGameBuilder;
///
/// let game = MemoryGameBuilder::new().pair_count(6).seed(42).build().unwrap();
/// assert_eq!(game.deck().len(), 12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryGameBuilder {
    config: GameConfig,
    catalog: Option<Catalog>,
    seed: Option<u64>,
}

impl MemoryGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn pair_count(mut self, pair_count: usize) -> Self {
        self.config.pair_count = pair_count;
        self
    }

    /// Deal from this catalog instead of the built-in one.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Seed the shuffle. Without a seed, the RNG draws from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and deal the first deck.
    pub fn build(self) -> Result<MemoryGame, ConfigError> {
        let catalog = self.catalog.unwrap_or_else(Catalog::builtin);
        self.config.validate(&catalog)?;

        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };

        let mut game = MemoryGame {
            config: self.config,
            catalog,
            rng,
            deck: Deck::default(),
            selection: SmallVec::new(),
            match_count: 0,
            phase: GamePhase::Memorizing,
            overlay: Some(Overlay::Start),
            timers: Scheduler::new(),
            reveal_timer: None,
            mismatch_timer: None,
            events: VecDeque::new(),
        };
        game.reset_game();
        Ok(game)
    }
}

/// Memory game controller.
///
/// ## Example
///
/// ```
/// use space_memory::game::{GamePhase, MemoryGameBuilder};
///
/// let mut game = MemoryGameBuilder::new().seed(7).build().unwrap();
/// assert_eq!(game.phase(), GamePhase::Memorizing);
///
/// game.run_until_idle();
/// assert_eq!(game.phase(), GamePhase::Playing);
/// assert!(game.deck().iter().all(|c| !c.face_up));
/// ```
#[derive(Clone, Debug)]
pub struct MemoryGame {
    config: GameConfig,
    catalog: Catalog,
    rng: GameRng,

    deck: Deck,
    /// Face-up, unmatched positions awaiting resolution.
    selection: SmallVec<[usize; 2]>,
    match_count: usize,

    phase: GamePhase,
    overlay: Option<Overlay>,

    timers: Scheduler<GameTimer>,
    /// Covers both reveal steps.
    reveal_timer: Option<TimerId>,
    mismatch_timer: Option<TimerId>,

    /// Bounded; hosts drain it each frame.
    events: VecDeque<GameEvent>,
}

impl MemoryGame {
    /// Build a default game (8 pairs, built-in catalog, entropy seed).
    pub fn new() -> Result<Self, ConfigError> {
        MemoryGameBuilder::new().build()
    }

    // === Operations ===

    /// Deal a fresh deck and restart the reveal sequence.
    ///
    /// Cancels every pending timer first, so nothing armed for the old deck
    /// can touch the new one.
    pub fn reset_game(&mut self) {
        for id in [self.reveal_timer.take(), self.mismatch_timer.take()].into_iter().flatten() {
            self.timers.cancel(id);
        }
        debug_assert!(self.timers.is_empty(), "timer armed outside the tracked handles");

        let items = self.catalog.first(self.config.pair_count);
        self.deck = Deck::deal(items, &mut self.rng);
        self.selection.clear();
        self.match_count = 0;
        self.phase = GamePhase::Memorizing;
        self.overlay = Some(Overlay::Start);

        self.reveal_timer = Some(self.timers.schedule(self.config.memorize_ms, GameTimer::ClearStartOverlay));

        tracing::debug!(
            cards = self.deck.len(),
            seed = self.rng.seed(),
            at = self.timers.now(),
            "Dealt new deck"
        );
        self.record(GameEvent::DeckDealt {
            card_count: self.deck.len(),
            seed: self.rng.seed(),
        });
        self.check_invariants();
    }

    /// Click the card at `position`.
    ///
    /// The whole click is one transition computed from the state before the
    /// click: guards, flip, and match check all read the same selection.
    ///
    /// Panics if `position` is outside the deck.
    pub fn handle_card_click(&mut self, position: usize) -> ClickOutcome {
        assert!(
            position < self.deck.len(),
            "card position {} out of range for {} cards",
            position,
            self.deck.len()
        );

        if let Some(reason) = self.click_guard(position) {
            tracing::trace!(position, ?reason, "Ignored card click");
            return ClickOutcome::Ignored(reason);
        }

        let clicked = self.deck[position];
        self.deck.set_face_up(position, true);
        self.record(GameEvent::CardFlipped { position });

        let Some(&first) = self.selection.first() else {
            self.selection.push(position);
            return ClickOutcome::Flipped;
        };

        let positions = [first, position];
        let outcome = if self.deck[first].pairs_with(&clicked) {
            self.resolve_match(positions, clicked.item_id)
        } else {
            self.selection.push(position);
            let id = self.timers.schedule(self.config.mismatch_delay_ms, GameTimer::FlipBack(positions));
            self.mismatch_timer = Some(id);

            tracing::debug!(?positions, "Pair mismatched");
            self.record(GameEvent::PairMismatched { positions });
            ClickOutcome::Mismatched
        };

        self.check_invariants();
        outcome
    }

    /// Pause or resume. Ignored unless the game has started.
    ///
    /// Returns whether anything changed.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.overlay = Some(Overlay::Pause);
                self.record(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.overlay = None;
                self.record(GameEvent::Resumed);
            }
            GamePhase::Memorizing | GamePhase::Won => return false,
        }

        tracing::debug!(phase = %self.phase, "Toggled pause");
        self.check_invariants();
        true
    }

    /// Show the help overlay, pausing a started game.
    ///
    /// While memorizing, the reveal sequence keeps running underneath; if
    /// help is still up when the cards hide, play starts paused. Ignored
    /// once the game is won.
    pub fn show_help(&mut self) -> bool {
        match self.phase {
            GamePhase::Won => return false,
            GamePhase::Memorizing => {}
            GamePhase::Playing | GamePhase::Paused => self.phase = GamePhase::Paused,
        }
        self.overlay = Some(Overlay::Help);
        self.record(GameEvent::HelpShown);

        tracing::debug!(phase = %self.phase, "Showing help");
        self.check_invariants();
        true
    }

    /// Press the overlay's button.
    ///
    /// Always clears the overlay. Dismissing help also resumes a paused
    /// game; dismissing pause leaves the game paused until `toggle_pause`.
    /// Dismissing win deals a new game. The start overlay has no button.
    /// Returns whether anything changed.
    pub fn dismiss_overlay(&mut self) -> bool {
        let Some(overlay) = self.overlay.filter(|o| o.is_dismissible()) else {
            return false;
        };
        self.record(GameEvent::OverlayDismissed(overlay));

        match overlay {
            Overlay::Win => self.reset_game(),
            Overlay::Help => {
                self.overlay = None;
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                }
            }
            Overlay::Pause => self.overlay = None,
            Overlay::Start => unreachable!("start overlay is not dismissible"),
        }

        tracing::debug!(%overlay, phase = %self.phase, "Dismissed overlay");
        self.check_invariants();
        true
    }

    /// Apply any player input. Returns whether the state changed.
    pub fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::FlipCard(position) => !self.handle_card_click(position).is_ignored(),
            Action::TogglePause => self.toggle_pause(),
            Action::Reset => {
                self.reset_game();
                true
            }
            Action::ShowHelp => self.show_help(),
            Action::DismissOverlay => self.dismiss_overlay(),
        }
    }

    /// Every action whose control is currently enabled.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = (0..self.deck.len())
            .filter(|&p| self.click_guard(p).is_none())
            .map(Action::FlipCard)
            .collect();

        if self.phase.is_started() {
            actions.push(Action::TogglePause);
        }
        actions.push(Action::Reset);
        if self.phase != GamePhase::Won {
            actions.push(Action::ShowHelp);
        }
        if self.overlay.is_some_and(Overlay::is_dismissible) {
            actions.push(Action::DismissOverlay);
        }
        actions
    }

    // === Time ===

    /// Advance the virtual clock, firing every timer that comes due.
    ///
    /// Returns how many timers fired.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let target = self.timers.now().saturating_add(elapsed_ms);
        let mut fired = 0;

        while let Some((id, timer)) = self.timers.pop_due(target) {
            self.fire(id, timer);
            fired += 1;
        }
        self.timers.advance_clock(target);
        fired
    }

    /// Fire timers until none are pending.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.timers.next_deadline() {
            fired += self.advance(deadline - self.timers.now());
        }
        fired
    }

    fn fire(&mut self, id: TimerId, timer: GameTimer) {
        tracing::trace!(%id, ?timer, at = self.timers.now(), "Timer fired");

        match timer {
            GameTimer::ClearStartOverlay => {
                if self.overlay == Some(Overlay::Start) {
                    self.overlay = None;
                    self.record(GameEvent::StartOverlayCleared);
                }
                self.reveal_timer = Some(self.timers.schedule(self.config.hide_delay_ms, GameTimer::HideCards));
            }
            GameTimer::HideCards => {
                self.reveal_timer = None;
                let count = self.deck.hide_unmatched();
                self.phase = if self.overlay == Some(Overlay::Help) {
                    GamePhase::Paused
                } else {
                    GamePhase::Playing
                };

                tracing::debug!(count, phase = %self.phase, "Cards hidden, game started");
                self.record(GameEvent::CardsHidden { count });
            }
            GameTimer::FlipBack(positions) => {
                self.mismatch_timer = None;
                for &p in &positions {
                    self.deck.set_face_up(p, false);
                }
                self.selection.clear();
                self.record(GameEvent::CardsFlippedBack { positions });
            }
        }

        self.check_invariants();
    }

    // === Helpers ===

    fn record(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub(super) fn click_guard(&self, position: usize) -> Option<IgnoreReason> {
        match self.phase {
            GamePhase::Playing => {}
            GamePhase::Paused => return Some(IgnoreReason::Paused),
            GamePhase::Memorizing | GamePhase::Won => return Some(IgnoreReason::NotStarted),
        }
        if self.selection.len() >= 2 {
            return Some(IgnoreReason::SelectionFull);
        }

        let card = &self.deck[position];
        if card.matched {
            Some(IgnoreReason::AlreadyMatched)
        } else if card.face_up {
            Some(IgnoreReason::AlreadyFaceUp)
        } else {
            None
        }
    }

    fn resolve_match(&mut self, positions: [usize; 2], item: ItemId) -> ClickOutcome {
        for &p in &positions {
            self.deck.mark_matched(p);
        }
        self.selection.clear();
        self.match_count += 1;

        tracing::debug!(%item, ?positions, matched = self.match_count, "Pair matched");
        self.record(GameEvent::PairMatched { item, positions });

        if self.match_count < self.config.pair_count {
            return ClickOutcome::Matched(item);
        }

        self.phase = GamePhase::Won;
        self.overlay = Some(Overlay::Win);
        tracing::info!(pairs = self.match_count, at = self.timers.now(), "Game won");
        self.record(GameEvent::Won);
        ClickOutcome::Won
    }

    fn check_invariants(&self) {
        debug_assert!(
            is_consistent(self.phase, self.overlay),
            "phase {:?} cannot show overlay {:?}",
            self.phase,
            self.overlay
        );
        debug_assert!(self.selection.len() <= 2);
        debug_assert_eq!(self.deck.matched_count(), self.match_count * 2);
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    /// Cards hidden and the game not yet won.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.phase.is_started()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase.is_paused()
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Get the card at a position.
    #[must_use]
    pub fn card(&self, position: usize) -> Option<&Card> {
        self.deck.get(position)
    }

    /// Positions currently selected, in click order.
    #[must_use]
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    #[must_use]
    pub fn match_count(&self) -> usize {
        self.match_count
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.config.pair_count
    }

    /// Seed of the shuffle RNG, for replaying a game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_reveal_pending(&self) -> bool {
        self.reveal_timer.is_some_and(|id| self.timers.is_pending(id))
    }

    #[must_use]
    pub fn is_mismatch_pending(&self) -> bool {
        self.mismatch_timer.is_some_and(|id| self.timers.is_pending(id))
    }

    /// Events recorded since the last drain, oldest first.
    ///
    /// At most `EVENT_LOG_CAPACITY` are kept; older ones are dropped.
    #[must_use]
    pub fn events(&self) -> &VecDeque<GameEvent> {
        &self.events
    }

    /// Take all recorded events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_game(seed: u64) -> MemoryGame {
        let mut game = MemoryGameBuilder::new().seed(seed).build().unwrap();
        game.run_until_idle();
        game
    }

    /// Positions of the two cards showing `item`.
    fn pair_of(game: &MemoryGame, item: ItemId) -> [usize; 2] {
        let positions: Vec<_> = game
            .deck()
            .iter()
            .filter(|c| c.item_id == item)
            .map(|c| c.position)
            .collect();
        [positions[0], positions[1]]
    }

    fn mismatched_pair(game: &MemoryGame) -> [usize; 2] {
        let first = game.deck()[0];
        let other = game.deck().iter().find(|c| c.item_id != first.item_id).unwrap();
        [first.position, other.position]
    }

    #[test]
    fn test_build_rejects_small_catalog() {
        let err = MemoryGameBuilder::new().pair_count(100).build().unwrap_err();
        assert!(matches!(err, ConfigError::CatalogTooSmall { required: 100, .. }));
    }

    #[test]
    fn test_initial_state() {
        let game = MemoryGameBuilder::new().seed(1).build().unwrap();

        assert_eq!(game.phase(), GamePhase::Memorizing);
        assert_eq!(game.overlay(), Some(Overlay::Start));
        assert!(!game.is_started());
        assert!(game.is_reveal_pending());
        assert!(game.deck().iter().all(|c| c.face_up && !c.matched));
    }

    #[test]
    fn test_reveal_sequence_steps() {
        let mut game = MemoryGameBuilder::new().seed(1).build().unwrap();

        game.advance(4999);
        assert_eq!(game.overlay(), Some(Overlay::Start));

        game.advance(1);
        assert_eq!(game.overlay(), None);
        assert_eq!(game.phase(), GamePhase::Memorizing);
        assert!(game.deck().iter().all(|c| c.face_up));

        game.advance(499);
        assert_eq!(game.phase(), GamePhase::Memorizing);

        game.advance(1);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.deck().iter().all(|c| !c.face_up));
        assert!(!game.is_reveal_pending());
    }

    #[test]
    fn test_second_click_on_selected_card_ignored() {
        let mut game = playing_game(3);
        assert_eq!(game.handle_card_click(0), ClickOutcome::Flipped);
        assert_eq!(
            game.handle_card_click(0),
            ClickOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
        );
        assert_eq!(game.selection(), &[0]);
    }

    #[test]
    fn test_match_resolves_immediately() {
        let mut game = playing_game(3);
        let item = game.deck()[0].item_id;
        let [a, b] = pair_of(&game, item);

        assert_eq!(game.handle_card_click(a), ClickOutcome::Flipped);
        assert_eq!(game.handle_card_click(b), ClickOutcome::Matched(item));

        assert!(game.card(a).unwrap().matched);
        assert!(game.card(b).unwrap().matched);
        assert!(game.selection().is_empty());
        assert_eq!(game.match_count(), 1);
        assert!(!game.is_mismatch_pending());
    }

    #[test]
    fn test_mismatch_flips_back_after_delay() {
        let mut game = playing_game(3);
        let [a, b] = mismatched_pair(&game);

        game.handle_card_click(a);
        assert_eq!(game.handle_card_click(b), ClickOutcome::Mismatched);
        assert!(game.card(a).unwrap().face_up);
        assert!(game.card(b).unwrap().face_up);
        assert_eq!(game.selection().len(), 2);

        game.advance(999);
        assert!(game.card(a).unwrap().face_up);

        game.advance(1);
        assert!(!game.card(a).unwrap().face_up);
        assert!(!game.card(b).unwrap().face_up);
        assert!(game.selection().is_empty());
    }

    #[test]
    fn test_selection_full_blocks_third_click() {
        let mut game = playing_game(3);
        let [a, b] = mismatched_pair(&game);
        game.handle_card_click(a);
        game.handle_card_click(b);

        let third = (0..game.deck().len()).find(|p| *p != a && *p != b).unwrap();
        assert_eq!(
            game.handle_card_click(third),
            ClickOutcome::Ignored(IgnoreReason::SelectionFull)
        );
        assert!(!game.card(third).unwrap().face_up);
    }

    #[test]
    fn test_reset_cancels_pending_mismatch() {
        let mut game = playing_game(3);
        let [a, b] = mismatched_pair(&game);
        game.handle_card_click(a);
        game.handle_card_click(b);

        game.reset_game();
        assert!(!game.is_mismatch_pending());

        // Only the new reveal timer remains.
        assert_eq!(game.pending_timers(), 1);
        game.advance(1000);
        assert!(game.deck().iter().all(|c| c.face_up));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_click_panics() {
        let mut game = playing_game(3);
        game.handle_card_click(16);
    }

    #[test]
    fn test_help_during_memorize_starts_paused() {
        let mut game = MemoryGameBuilder::new().seed(5).build().unwrap();
        assert!(game.show_help());
        assert_eq!(game.phase(), GamePhase::Memorizing);
        assert_eq!(game.overlay(), Some(Overlay::Help));

        game.run_until_idle();
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(game.overlay(), Some(Overlay::Help));

        assert!(game.dismiss_overlay());
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.overlay(), None);
    }

    #[test]
    fn test_help_dismissed_during_memorize() {
        let mut game = MemoryGameBuilder::new().seed(5).build().unwrap();
        game.show_help();
        game.dismiss_overlay();

        assert_eq!(game.phase(), GamePhase::Memorizing);
        assert_eq!(game.overlay(), None);

        game.run_until_idle();
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_events_recorded() {
        let mut game = MemoryGameBuilder::new().seed(9).build().unwrap();
        let events = game.drain_events();
        assert!(matches!(events[0], GameEvent::DeckDealt { card_count: 16, seed: 9 }));

        game.run_until_idle();
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::StartOverlayCleared, GameEvent::CardsHidden { count: 16 }]
        );
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut game = MemoryGameBuilder::new().seed(9).build().unwrap();
        for _ in 0..1000 {
            game.run_until_idle();
            game.toggle_pause();
            game.toggle_pause();
            game.reset_game();
        }

        assert_eq!(game.events().len(), EVENT_LOG_CAPACITY);
        assert!(matches!(game.events().back(), Some(GameEvent::DeckDealt { .. })));
        assert_eq!(game.drain_events().len(), EVENT_LOG_CAPACITY);
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_dismiss_pause_clears_overlay_only() {
        let mut game = playing_game(3);
        game.toggle_pause();

        assert!(game.dismiss_overlay());
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(game.overlay(), None);
        assert!(!game.legal_actions().contains(&Action::DismissOverlay));
    }
}
