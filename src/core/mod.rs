//! Core types: configuration, errors, RNG, player actions.
//!
//! Everything here is independent of the board itself. Games configure the
//! controller via `GameConfig` rather than hardcoded constants.

pub mod rng;
pub mod config;
pub mod error;
pub mod action;

pub use rng::GameRng;
pub use config::{GameConfig, DEFAULT_PAIR_COUNT};
pub use error::ConfigError;
pub use action::Action;
