//! Deck building and per-card flag updates.
//!
//! A `Deck` is the full board: every dealt item duplicated, shuffled, and
//! assigned a fixed position. Stored in an `im::Vector` so snapshots for
//! rendering or agents clone in O(1).

use im::Vector;
use rustc_hash::FxHashMap;

use super::definition::{ItemDefinition, ItemId};
use super::instance::Card;
use crate::core::GameRng;

/// The cards on the board, indexed by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Deal a fresh deck: each item twice, shuffled, all face-up.
    ///
    /// ```
    /// use space_memory::cards::{Catalog, Deck};
    /// use space_memory::core::GameRng;
    ///
    /// let catalog = Catalog::builtin();
    /// let deck = Deck::deal(catalog.first(8), &mut GameRng::new(7));
    ///
    /// assert_eq!(deck.len(), 16);
    /// assert!(deck.is_well_formed());
    /// assert!(deck.iter().all(|c| c.face_up));
    /// ```
    #[must_use]
    pub fn deal(items: &[ItemDefinition], rng: &mut GameRng) -> Self {
        let mut ids: Vec<ItemId> = items.iter().chain(items.iter()).map(|item| item.id).collect();
        rng.shuffle(&mut ids);

        let cards = ids
            .into_iter()
            .enumerate()
            .map(|(position, item_id)| Card::new(position, item_id))
            .collect();

        Self { cards }
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the card at a position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// Iterate over cards in position order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Flip a card face-up or face-down.
    pub fn set_face_up(&mut self, position: usize, face_up: bool) {
        if let Some(card) = self.cards.get_mut(position) {
            card.face_up = face_up;
        }
    }

    /// Mark a card as matched.
    pub fn mark_matched(&mut self, position: usize) {
        if let Some(card) = self.cards.get_mut(position) {
            card.matched = true;
        }
    }

    /// Turn every unmatched card face-down. Returns how many flipped.
    pub fn hide_unmatched(&mut self) -> usize {
        let mut flipped = 0;
        for card in self.cards.iter_mut() {
            if card.face_up && !card.matched {
                card.face_up = false;
                flipped += 1;
            }
        }
        flipped
    }

    /// Number of matched cards.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count()
    }

    /// Check the pairing invariant: positions are `0..len` in order and
    /// every item appears exactly twice.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let mut counts: FxHashMap<ItemId, usize> = FxHashMap::default();
        for (expected, card) in self.cards.iter().enumerate() {
            if card.position != expected {
                return false;
            }
            *counts.entry(card.item_id).or_insert(0) += 1;
        }
        counts.values().all(|&n| n == 2)
    }
}

impl std::ops::Index<usize> for Deck {
    type Output = Card;

    fn index(&self, position: usize) -> &Card {
        &self.cards[position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Catalog;

    fn deal(seed: u64) -> Deck {
        Deck::deal(Catalog::builtin().first(8), &mut GameRng::new(seed))
    }

    #[test]
    fn test_deal_shape() {
        let deck = deal(42);
        assert_eq!(deck.len(), 16);
        assert!(deck.is_well_formed());
        assert_eq!(deck.matched_count(), 0);
    }

    #[test]
    fn test_deal_is_deterministic_per_seed() {
        assert_eq!(deal(1), deal(1));
        assert_ne!(deal(1), deal(2));
    }

    #[test]
    fn test_hide_unmatched_skips_matched() {
        let mut deck = deal(42);
        deck.mark_matched(0);

        let flipped = deck.hide_unmatched();

        assert_eq!(flipped, 15);
        assert!(deck.get(0).unwrap().is_revealed());
        assert!(deck.iter().skip(1).all(|c| !c.face_up));
    }

    #[test]
    fn test_set_face_up_out_of_range_is_noop() {
        let mut deck = deal(42);
        let before = deck.clone();
        deck.set_face_up(99, false);
        assert_eq!(deck, before);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut deck = deal(42);
        let snapshot = deck.clone();

        deck.set_face_up(3, false);

        assert!(snapshot.get(3).unwrap().face_up);
        assert!(!deck.get(3).unwrap().face_up);
    }

    #[test]
    fn test_well_formed_detects_triplicate() {
        let items = Catalog::builtin();
        let mut deck = Deck::deal(items.first(2), &mut GameRng::new(0));
        assert!(deck.is_well_formed());

        let mut cards = deck.cards.clone();
        let first = cards[0].item_id;
        for card in cards.iter_mut() {
            card.item_id = first;
        }
        deck.cards = cards;
        assert!(!deck.is_well_formed());
    }
}
