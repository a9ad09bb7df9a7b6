//! Per-seat player snapshot.

use super::deck::Deck;
use super::lands::Lands;
use crate::core::Seat;

/// One competitor's observed state.
///
/// Counters are signed: the protocol reports them as plain integers and a
/// payment can be observed before the matching gain.
#[derive(Clone, Debug)]
pub struct Player {
    pub seat: Seat,
    pub name: String,
    pub health: i32,
    pub hand_count: i32,
    pub deck_count: i32,
    /// Current faeria.
    pub faeria: i32,
    /// Faeria harvested over the game.
    pub harvested: i32,
    pub lands: Lands,
    pub deck: Deck,
}

impl Player {
    /// A player with zeroed counters.
    #[must_use]
    pub fn new(seat: Seat, name: impl Into<String>, deck: Deck) -> Self {
        Self {
            seat,
            name: name.into(),
            health: 0,
            hand_count: 0,
            deck_count: 0,
            faeria: 0,
            harvested: 0,
            lands: Lands::new(),
            deck,
        }
    }

    /// Deck cards whose identity has not been seen yet.
    ///
    /// For the local player this is the reported deck size minus what the
    /// deck list accounts for. Nothing of the opponent's deck is known up
    /// front, so the whole reported size counts.
    #[must_use]
    pub fn unknown_cards(&self, is_local: bool) -> i32 {
        if is_local {
            self.deck_count - i32::try_from(self.deck.cardcount()).unwrap_or(i32::MAX)
        } else {
            self.deck_count
        }
    }
}
