//! Card system: item definitions, the catalog, card instances, and decks.
//!
//! ## Key Types
//!
//! - `ItemId`: Identifier shared by the two cards of a pair
//! - `ItemDefinition`: Static item data (image source, alt text)
//! - `Catalog`: Ordered item definitions a game deals from
//! - `Card`: Runtime card state (position, face-up, matched)
//! - `Deck`: The shuffled board

pub mod definition;
pub mod catalog;
pub mod instance;
pub mod deck;

pub use definition::{ItemDefinition, ItemId};
pub use catalog::Catalog;
pub use instance::Card;
pub use deck::Deck;
