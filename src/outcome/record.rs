//! The per-game outcome record.
//!
//! One record is produced when the victory event arrives. Its JSON shape is
//! the line format of the outcome log and is read back by the history view.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{Seat, TrackError};
use crate::model::{Deck, Game, Lands, Player};

/// `[quantity, card id, card name]` for one deck-list card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry(pub u32, pub CardId, pub String);

impl DeckEntry {
    /// Entries for every card that was part of the deck list, skipping
    /// cards created during play.
    #[must_use]
    pub fn list(deck: &Deck) -> Vec<DeckEntry> {
        deck.cards()
            .filter(|dc| !dc.generated)
            .map(|dc| DeckEntry(dc.quantity(), dc.card_id(), dc.card.name.clone()))
            .collect()
    }
}

/// What was seen of the opponent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentSide {
    pub mode: String,
    pub rank: String,
    pub grank: String,
    pub name: String,
    pub health: i32,
    pub handcards: i32,
    pub deckcards: i32,
    pub faeria: i32,
    pub eco: i32,
    pub deck: Vec<DeckEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lands: Option<Lands>,
}

/// The local player's side of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSide {
    pub mode: String,
    pub health: i32,
    pub handcards: i32,
    pub deckcards: i32,
    pub faeria: i32,
    pub eco: i32,
    pub deckname: String,
    pub deck: Vec<DeckEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lands: Option<Lands>,
}

/// One finished game, serialized as a JSON object per line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Local time, `%Y%m%dT%H%M%S`.
    pub stamp: String,
    /// The local player had the first turn.
    pub first: bool,
    pub victory: bool,
    pub endreason: String,
    pub turn: u32,
    pub opponent: OpponentSide,
    pub me: LocalSide,
}

impl OutcomeRecord {
    /// Build the record for a finished game.
    ///
    /// `winner` is the protocol's 1-based winning seat.
    pub fn from_game(
        game: &Game,
        winner: i32,
        reason: &str,
        stamp: String,
    ) -> Result<Self, TrackError> {
        let seating = game
            .seating
            .as_ref()
            .ok_or_else(|| TrackError::state("$victory", "seats were never assigned"))?;
        let me = seating.local_player();
        let opp = seating.opponent_player();

        Ok(Self {
            stamp,
            first: seating.local == Seat::FIRST,
            victory: winner == seating.local.wire() + 1,
            endreason: reason.to_string(),
            turn: game.turn,
            opponent: OpponentSide {
                mode: game.opponent_mode.clone(),
                rank: game.opponent.rank.clone(),
                grank: game.opponent.god_rank.clone(),
                name: game.opponent.name.clone(),
                health: opp.health,
                handcards: opp.hand_count,
                deckcards: opp.deck_count,
                faeria: opp.faeria,
                eco: opp.harvested,
                deck: DeckEntry::list(&opp.deck),
                lands: Some(opp.lands),
            },
            me: local_side(game, me),
        })
    }

    /// `Won` or `Loss`.
    #[must_use]
    pub fn result_word(&self) -> &'static str {
        if self.victory {
            "Won"
        } else {
            "Loss"
        }
    }
}

fn local_side(game: &Game, me: &Player) -> LocalSide {
    LocalSide {
        mode: game.self_mode.clone(),
        health: me.health,
        handcards: me.hand_count,
        deckcards: me.deck_count,
        faeria: me.faeria,
        eco: me.harvested,
        deckname: me.deck.name.clone(),
        deck: DeckEntry::list(&me.deck),
        lands: Some(me.lands),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::model::{DeckCard, DeckId, LandColor, OpponentInfo, Zone};
    use std::sync::Arc;

    fn finished_game(local: Seat) -> Game {
        let mut deck = Deck::new(DeckId(5), "Ramp");
        let elk = Arc::new(Card::new(CardId::new(10), "Elk"));
        deck.locate_or_insert_with(&elk, |c| DeckCard::new(c, 3));

        let mut game = Game::new(
            deck,
            OpponentInfo {
                name: "Bob".into(),
                rank: "7".into(),
                god_rank: "0".into(),
            },
        );
        game.assign_seats(local, "me");
        game.turn = 12;
        game.self_mode = "COMPETITIVE".into();

        let seating = game.seating.as_mut().unwrap();
        let token = Arc::new(Card::new(CardId::new(99), "Token"));
        let mine = &mut seating.players[local];
        mine.deck
            .locate_or_insert_with(&token, DeckCard::generated)
            .arrive(Zone::Hand);
        mine.lands.gain(LandColor::Green);
        mine.harvested = 4;
        seating.players[local.other()].health = 0;
        game
    }

    #[test]
    fn test_record_from_game() {
        let game = finished_game(Seat::FIRST);
        let record = OutcomeRecord::from_game(&game, 1, "HEALTH", "20261018T120000".into()).unwrap();

        assert!(record.first);
        assert!(record.victory);
        assert_eq!(record.turn, 12);
        assert_eq!(record.opponent.name, "Bob");
        assert_eq!(record.opponent.rank, "7");
        assert_eq!(record.me.deckname, "Ramp");
        assert_eq!(record.me.eco, 4);
        assert_eq!(
            record.me.deck,
            vec![DeckEntry(3, CardId::new(10), "Elk".to_string())]
        );
        assert_eq!(record.result_word(), "Won");
    }

    #[test]
    fn test_second_seat_loses_when_first_wins() {
        let game = finished_game(Seat::SECOND);
        let record = OutcomeRecord::from_game(&game, 1, "HEALTH", String::new()).unwrap();
        assert!(!record.first);
        assert!(!record.victory);
    }

    #[test]
    fn test_json_shape() {
        let game = finished_game(Seat::FIRST);
        let record = OutcomeRecord::from_game(&game, 2, "CONCEDE", "s".into()).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["endreason"], "CONCEDE");
        assert_eq!(value["me"]["deck"][0], serde_json::json!([3, 10, "Elk"]));
        assert_eq!(value["me"]["lands"]["green"], 1);
        assert_eq!(value["opponent"]["grank"], "0");
    }

    #[test]
    fn test_requires_seats() {
        let game = Game::new(
            Deck::new(DeckId(1), "x"),
            OpponentInfo {
                name: "Bob".into(),
                rank: "0".into(),
                god_rank: "0".into(),
            },
        );
        assert!(OutcomeRecord::from_game(&game, 1, "HEALTH", String::new()).is_err());
    }
}
