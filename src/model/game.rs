//! The active game.
//!
//! A `Game` exists from the game-start event until game-stop or a session
//! reset. Players only appear once seats are assigned; until then the game
//! holds the template deck and what is known about the opponent.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::deck::{Deck, DeckId};
use super::player::Player;
use crate::cards::Card;
use crate::core::{Seat, SeatMap};

/// Placeholder used by the protocol and by the tracker for unknown values.
pub const UNKNOWN: &str = "?";

/// Ephemeral id of one physical card copy within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameCardId(pub i64);

impl std::fmt::Display for GameCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a game-card instance id was bound to.
#[derive(Clone, Debug)]
pub struct GameCard {
    /// Owner seat as reported on the wire (may be outside 0..=1).
    pub owner: i32,
    /// Protocol type tag.
    pub kind: String,
    pub card: Arc<Card>,
}

/// What the game-members event said about the opponent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpponentInfo {
    pub name: String,
    pub rank: String,
    pub god_rank: String,
}

impl OpponentInfo {
    /// Short opponent classification shown next to the name.
    ///
    /// ```
    /// use faeria_track::model::OpponentInfo;
    ///
    /// let cpu = OpponentInfo { name: "Bot".into(), rank: "0".into(), god_rank: "0".into() };
    /// assert_eq!(cpu.label(), "CPU");
    ///
    /// let god = OpponentInfo { name: "X".into(), rank: "0".into(), god_rank: "12".into() };
    /// assert_eq!(god.label(), "G12");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        if self.rank == "0" && self.god_rank == "0" {
            "CPU".to_string()
        } else if self.god_rank != "0" {
            format!("G{}", self.god_rank)
        } else if self.rank != "0" {
            format!("R{}", self.rank)
        } else {
            UNKNOWN.to_string()
        }
    }

    /// Name with the classification appended, e.g. `Alice(R7)`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}({})", self.name, self.label())
    }
}

/// Seat assignment and the two players.
#[derive(Clone, Debug)]
pub struct Seating {
    pub local: Seat,
    pub players: SeatMap<Player>,
}

impl Seating {
    /// The seat across from the local one.
    #[must_use]
    pub fn opponent(&self) -> Seat {
        self.local.other()
    }

    /// The local player's state.
    #[must_use]
    pub fn local_player(&self) -> &Player {
        &self.players[self.local]
    }

    /// The opponent's state.
    #[must_use]
    pub fn opponent_player(&self) -> &Player {
        &self.players[self.opponent()]
    }
}

/// One observed game, from its start message until it stops.
#[derive(Clone, Debug)]
pub struct Game {
    /// Snapshot of the selected deck at game start.
    pub initial_deck: Deck,
    pub opponent: OpponentInfo,
    pub self_mode: String,
    pub opponent_mode: String,
    pub seating: Option<Seating>,
    pub turn: u32,
    pub current_seat: Option<Seat>,
    game_cards: FxHashMap<GameCardId, GameCard>,
}

impl Game {
    /// Start a game from a copy of the local deck template.
    #[must_use]
    pub fn new(initial_deck: Deck, opponent: OpponentInfo) -> Self {
        Self {
            initial_deck,
            opponent,
            self_mode: UNKNOWN.to_string(),
            opponent_mode: UNKNOWN.to_string(),
            seating: None,
            turn: 0,
            current_seat: None,
            game_cards: FxHashMap::default(),
        }
    }

    /// Create both players for the given local seat.
    ///
    /// The local player gets its own clone of the initial deck; the
    /// opponent starts from an empty deck filled in by inference. Seat 0
    /// always takes the first turn.
    pub fn assign_seats(&mut self, local: Seat, local_name: &str) {
        let opponent_name = self.opponent.display_name();
        let template = &self.initial_deck;
        let players = SeatMap::new(|seat| {
            if seat == local {
                Player::new(seat, local_name, template.clone())
            } else {
                Player::new(seat, opponent_name.clone(), Deck::new(DeckId(0), "Opponent"))
            }
        });

        self.seating = Some(Seating { local, players });
        self.current_seat = Some(if local == Seat::FIRST {
            local
        } else {
            local.other()
        });
    }

    /// The local seat, once assigned.
    #[must_use]
    pub fn local_seat(&self) -> Option<Seat> {
        self.seating.as_ref().map(|s| s.local)
    }

    /// Player state for a seat, once seats are assigned.
    #[must_use]
    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.seating.as_ref().map(|s| &s.players[seat])
    }

    /// Mutable player state for a seat, once seats are assigned.
    pub fn player_mut(&mut self, seat: Seat) -> Option<&mut Player> {
        self.seating.as_mut().map(|s| &mut s.players[seat])
    }

    /// Bind an instance id. A later bind of the same id replaces the
    /// earlier one; ids are never removed.
    pub fn bind_card(&mut self, id: GameCardId, card: GameCard) {
        self.game_cards.insert(id, card);
    }

    /// Look up a bound game card.
    #[must_use]
    pub fn resolve(&self, id: GameCardId) -> Option<&GameCard> {
        self.game_cards.get(&id)
    }

    /// Number of bound game cards.
    #[must_use]
    pub fn bound_cards(&self) -> usize {
        self.game_cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::model::deck::DeckCard;

    fn opponent(rank: &str, god_rank: &str) -> OpponentInfo {
        OpponentInfo {
            name: "Bob".to_string(),
            rank: rank.to_string(),
            god_rank: god_rank.to_string(),
        }
    }

    fn template() -> Deck {
        let mut deck = Deck::new(DeckId(5), "Aggro");
        let card = Arc::new(Card::new(CardId::new(10), "Goblin"));
        deck.locate_or_insert_with(&card, |c| DeckCard::new(c, 3));
        deck
    }

    #[test]
    fn test_labels() {
        assert_eq!(opponent("0", "0").label(), "CPU");
        assert_eq!(opponent("5", "3").label(), "G3");
        assert_eq!(opponent("5", "0").label(), "R5");
        assert_eq!(opponent("?", "?").label(), "G?");
        assert_eq!(opponent("5", "0").display_name(), "Bob(R5)");
    }

    #[test]
    fn test_assign_seats_first() {
        let mut game = Game::new(template(), opponent("4", "0"));
        game.assign_seats(Seat::FIRST, "me");

        let seating = game.seating.as_ref().unwrap();
        assert_eq!(seating.opponent(), Seat::SECOND);
        assert_eq!(seating.local_player().name, "me");
        assert_eq!(seating.local_player().deck.cardcount(), 3);
        assert_eq!(seating.opponent_player().name, "Bob(R4)");
        assert!(seating.opponent_player().deck.is_empty());
        assert_eq!(game.current_seat, Some(Seat::FIRST));
    }

    #[test]
    fn test_assign_seats_second_opens_with_opponent() {
        let mut game = Game::new(template(), opponent("0", "0"));
        game.assign_seats(Seat::SECOND, "me");

        assert_eq!(game.local_seat(), Some(Seat::SECOND));
        assert_eq!(game.current_seat, Some(Seat::FIRST));
    }

    #[test]
    fn test_bind_and_resolve() {
        let mut game = Game::new(template(), opponent("0", "0"));
        let card = Arc::new(Card::new(CardId::new(10), "Goblin"));
        game.bind_card(
            GameCardId(900),
            GameCard {
                owner: 1,
                kind: "CREATURE".to_string(),
                card,
            },
        );

        assert_eq!(game.resolve(GameCardId(900)).unwrap().card.id, CardId::new(10));
        assert!(game.resolve(GameCardId(901)).is_none());
        assert_eq!(game.bound_cards(), 1);
    }
}
