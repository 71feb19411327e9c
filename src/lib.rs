//! # space-memory
//!
//! A memory-matching card game engine.
//!
//! A grid of cards is dealt face-up for the player to memorize, then hidden.
//! The player flips two cards at a time; matching pairs stay revealed,
//! mismatches flip back after a short delay. Find every pair to win.
//!
//! ## Design Principles
//!
//! 1. **Frontend-Agnostic**: The controller exposes a `BoardView` and takes
//!    `Action`s. Browsers, terminals and Python agents drive the same code.
//!
//! 2. **Virtual Time**: Timers live in an owned scheduler and only fire when
//!    the host advances the clock. Resets cancel everything pending.
//!
//! 3. **Explicit States**: One `GamePhase` plus an optional `Overlay`, with
//!    unreachable pairings ruled out.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, RNG, actions
//! - `cards`: Item definitions, catalog, cards, deck
//! - `timers`: Virtual-time timer queue
//! - `game`: Controller, phases, events, view

pub mod core;
pub mod cards;
pub mod timers;
pub mod game;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{Action, ConfigError, GameConfig, GameRng};

pub use crate::cards::{Card, Catalog, Deck, ItemDefinition, ItemId};

pub use crate::timers::{Scheduler, TimerId};

pub use crate::game::{
    BoardView, CardView, ClickOutcome, GameEvent, GamePhase, IgnoreReason,
    MemoryGame, MemoryGameBuilder, Overlay, OverlayView,
};
