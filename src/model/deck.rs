//! Decks and tracked card quantities.
//!
//! A `Deck` is an insertion-ordered map of `CardId` to `DeckCard`. Each
//! `DeckCard` splits its copies into "still in the deck" (`quantity`) and
//! "known to be in hand" (`hquantity`). Both counters are clamped at zero on
//! every update, so a missed event can never drive them negative.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// Account deck identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(pub u32);

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A location within one seat's play area, as named on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    Deck,
    Hand,
    /// Board, graveyard and everything else the tracker does not count.
    Other,
}

impl Zone {
    /// Map a wire zone name, folding everything untracked into `Other`.
    #[must_use]
    pub fn from_wire(name: &str) -> Self {
        match name {
            "deck" => Zone::Deck,
            "hand" => Zone::Hand,
            _ => Zone::Other,
        }
    }
}

/// Tracked copies of one card within a deck.
#[derive(Clone, Debug)]
pub struct DeckCard {
    pub card: Arc<Card>,
    quantity: u32,
    hquantity: u32,
    /// The card entered through an in-game effect rather than the deck list.
    pub generated: bool,
}

impl DeckCard {
    /// A card from the deck list.
    #[must_use]
    pub fn new(card: Arc<Card>, quantity: u32) -> Self {
        Self {
            card,
            quantity,
            hquantity: 0,
            generated: false,
        }
    }

    /// A card created during play, starting with no copies.
    #[must_use]
    pub fn generated(card: Arc<Card>) -> Self {
        Self {
            card,
            quantity: 0,
            hquantity: 0,
            generated: true,
        }
    }

    /// The catalog id of the tracked card.
    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.card.id
    }

    /// Copies remaining in the deck.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Copies known to be in hand.
    #[must_use]
    pub fn hquantity(&self) -> u32 {
        self.hquantity
    }

    /// Copies seen so far, in deck or in hand.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.quantity.saturating_add(self.hquantity)
    }

    /// Apply a deck-list delta, flooring at zero.
    pub fn adjust_quantity(&mut self, delta: i32) {
        self.quantity = clamp(i64::from(self.quantity) + i64::from(delta));
    }

    /// Add one copy to the counter for `zone`.
    pub fn arrive(&mut self, zone: Zone) {
        self.shift(Zone::Other, zone);
    }

    /// Move one copy from `from` to `to`.
    ///
    /// The decrement and increment are applied before clamping, so a move
    /// within the same zone leaves the counters untouched.
    pub fn shift(&mut self, from: Zone, to: Zone) {
        let mut quantity = i64::from(self.quantity);
        let mut hquantity = i64::from(self.hquantity);

        match from {
            Zone::Deck => quantity -= 1,
            Zone::Hand => hquantity -= 1,
            Zone::Other => {}
        }
        match to {
            Zone::Deck => quantity += 1,
            Zone::Hand => hquantity += 1,
            Zone::Other => {}
        }

        self.quantity = clamp(quantity);
        self.hquantity = clamp(hquantity);
    }
}

fn clamp(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// A named, ordered list of tracked cards.
#[derive(Clone, Debug)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    cards: Vec<DeckCard>,
    index: FxHashMap<CardId, usize>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new(id: DeckId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cards: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Sum of copies remaining in the deck.
    #[must_use]
    pub fn cardcount(&self) -> u32 {
        self.cards
            .iter()
            .fold(0u32, |sum, dc| sum.saturating_add(dc.quantity))
    }

    /// Get the entry for a card.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&DeckCard> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    /// Get a mutable entry for a card.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut DeckCard> {
        let i = *self.index.get(&id)?;
        Some(&mut self.cards[i])
    }

    /// Find the entry for a card, appending one built by `create` if absent.
    pub fn locate_or_insert_with(
        &mut self,
        card: &Arc<Card>,
        create: impl FnOnce(Arc<Card>) -> DeckCard,
    ) -> &mut DeckCard {
        let i = match self.index.get(&card.id) {
            Some(&i) => i,
            None => {
                self.cards.push(create(Arc::clone(card)));
                let i = self.cards.len() - 1;
                self.index.insert(card.id, i);
                i
            }
        };
        &mut self.cards[i]
    }

    /// Drop every tracked card.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.index.clear();
    }

    /// Tracked cards in insertion order.
    pub fn cards(&self) -> impl Iterator<Item = &DeckCard> {
        self.cards.iter()
    }

    /// Number of distinct cards tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if no card is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
