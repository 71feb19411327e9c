//! The memory game: phase machine, controller, events, and render view.
//!
//! ## Key Types
//!
//! - `MemoryGame`: Owns all game state and timers
//! - `MemoryGameBuilder`: Validated construction from config and catalog
//! - `GamePhase` / `Overlay`: What the player can do, and what is drawn on top
//! - `GameEvent`: Transition log for frontends
//! - `BoardView`: Render-ready snapshot

mod controller;
mod event;
mod phase;
mod view;

pub use controller::{ClickOutcome, IgnoreReason, EVENT_LOG_CAPACITY, MemoryGame, MemoryGameBuilder};
pub use event::GameEvent;
pub use phase::{is_consistent, GamePhase, Overlay};
pub use view::{BoardView, CardView, ControlIcon, ControlView, ControlsView, OverlayButton, OverlayView};
