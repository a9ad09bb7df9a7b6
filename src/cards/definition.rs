//! Card definitions - static catalog data.
//!
//! A `Card` is the immutable name/text entry for one card id. Tracked
//! quantities live in `DeckCard` (see `model::deck`), which holds a shared
//! reference to the catalog entry.

use serde::{Deserialize, Serialize};

/// Catalog identifier of a card.
///
/// Identifies the printed card, not a copy of it in a game. Copies in a
/// game are addressed by `GameCardId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Wrap a raw catalog id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw catalog id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static catalog entry.
///
/// ```
/// use faeria_track::cards::{Card, CardId};
///
/// let card = Card::new(CardId::new(7), "Seafront Dealer").with_text("Deal 1 damage.");
/// assert_eq!(card.name, "Seafront Dealer");
/// assert_eq!(card.text.as_deref(), Some("Deal 1 damage."));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    pub name: String,

    /// Rules text, when the catalog provides it.
    pub text: Option<String>,
}

impl Card {
    /// Create a card with a name and no text.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            text: None,
        }
    }

    /// Add rules text (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Name shortened for narrow columns.
    ///
    /// Everything after the first comma is reduced to word initials, so
    /// `"Garmant, Lord of the Deep"` becomes `"Garmant, LotD"`.
    #[must_use]
    pub fn short_name(&self) -> String {
        match self.name.split_once(',') {
            Some((prefix, rest)) => {
                let initials: String = rest
                    .split_whitespace()
                    .filter_map(|word| word.chars().next())
                    .collect();
                format!("{prefix}, {initials}")
            }
            None => self.name.clone(),
        }
    }
}
