//! Entity model: decks, players, lands and the active game.

pub mod deck;
pub mod game;
pub mod lands;
pub mod player;

pub use deck::{Deck, DeckCard, DeckId, Zone};
pub use game::{Game, GameCard, GameCardId, OpponentInfo, Seating, UNKNOWN};
pub use lands::{LandColor, Lands};
pub use player::Player;
