//! Session state owned by the tracker.
//!
//! Everything the tracker knows lives in one `Session` value. Transitions
//! receive it explicitly; nothing is stored anywhere else.

use rustc_hash::FxHashMap;

use crate::core::{Reference, Seat, TrackError};
use crate::model::{Deck, DeckId, Game, Player};

/// All tracker state between commands.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// Account decks by id.
    pub decks: FxHashMap<DeckId, Deck>,
    /// Deck picked for the next game.
    pub selected_deck: Option<DeckId>,
    /// Local account name.
    pub user_name: Option<String>,
    pub game: Option<Game>,
}

impl Session {
    /// An empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget decks, selection, identity and any game.
    pub fn reset(&mut self) {
        *self = Session::default();
    }

    /// A known account deck, required by `command`.
    pub fn deck_mut(&mut self, command: &'static str, id: DeckId) -> Result<&mut Deck, TrackError> {
        self.decks
            .get_mut(&id)
            .ok_or_else(|| TrackError::unknown(command, Reference::Deck, id))
    }

    /// Get an account deck by id.
    #[must_use]
    pub fn deck(&self, id: DeckId) -> Option<&Deck> {
        self.decks.get(&id)
    }

    /// The active game, required by `command`.
    pub fn require_game(&mut self, command: &'static str) -> Result<&mut Game, TrackError> {
        self.game
            .as_mut()
            .ok_or_else(|| TrackError::state(command, "no active game"))
    }
}

/// Resolve a wire seat to a seated player.
pub(crate) fn seated_player<'g>(
    game: &'g mut Game,
    command: &'static str,
    raw_seat: i32,
) -> Result<&'g mut Player, TrackError> {
    let seat =
        Seat::from_wire(raw_seat).ok_or_else(|| TrackError::unknown(command, Reference::Seat, raw_seat))?;
    game.player_mut(seat)
        .ok_or_else(|| TrackError::unknown(command, Reference::Seat, raw_seat))
}
