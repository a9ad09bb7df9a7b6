//! Card catalog lookup.
//!
//! The tracker only ever asks one question of the catalog: "what card is
//! this id?". `CardCatalog` is that seam; `CardRegistry` is the in-memory
//! implementation filled by a loader or by tests.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId};

/// Read-only card lookup.
pub trait CardCatalog {
    /// Look up a card by catalog id.
    fn lookup(&self, id: CardId) -> Option<Arc<Card>>;
}

/// In-memory card catalog.
///
/// ## Example
///
/// ```
/// use faeria_track::cards::{Card, CardCatalog, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(Card::new(CardId::new(1), "Aurora"));
///
/// assert_eq!(registry.lookup(CardId::new(1)).unwrap().name, "Aurora");
/// assert!(registry.lookup(CardId::new(2)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Arc<Card>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card, replacing any earlier entry with the same id.
    pub fn register(&mut self, card: Card) {
        self.cards.insert(card.id, Arc::new(card));
    }

    /// Get a card, creating a nameless entry if it is missing.
    ///
    /// Used by loaders that see a card's fields one line at a time.
    pub fn entry(&mut self, id: CardId) -> &mut Card {
        let slot = self
            .cards
            .entry(id)
            .or_insert_with(|| Arc::new(Card::new(id, String::new())));
        Arc::make_mut(slot)
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id).map(|card| card.as_ref())
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values().map(|card| card.as_ref())
    }
}

impl CardCatalog for CardRegistry {
    fn lookup(&self, id: CardId) -> Option<Arc<Card>> {
        self.cards.get(&id).cloned()
    }
}

impl FromIterator<Card> for CardRegistry {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut registry = CardRegistry::new();
        for card in iter {
            registry.register(card);
        }
        registry
    }
}
