//! Tracker state machine tests.
//!
//! These tests drive the tracker with decoded command lines the way the
//! game server sends them:
//! - Deck definition, selection and quantities
//! - Game start and seat assignment
//! - Zone-move inference for both seats
//! - Outcome records and fatal protocol states

use faeria_track::cards::{Card, CardId, CardRegistry};
use faeria_track::core::{ErrorKind, Seat};
use faeria_track::model::{DeckId, LandColor};
use faeria_track::protocol::Command;
use faeria_track::tracker::{FixedClock, Tracker};
use faeria_track::{OutcomeRecord, TrackError};

const STAMP: &str = "20261018T201500";

fn catalog() -> CardRegistry {
    [
        Card::new(CardId::new(10), "Wildheart Elk"),
        Card::new(CardId::new(11), "Garmant, Lord of the Deep"),
        Card::new(CardId::new(12), "Aurora"),
        Card::new(CardId::new(99), "Wisp"),
    ]
    .into_iter()
    .collect()
}

fn tracker() -> Tracker<CardRegistry> {
    Tracker::with_clock(catalog(), FixedClock(STAMP.to_string()))
}

fn feed(tracker: &mut Tracker<CardRegistry>, lines: &[&str]) -> Result<Vec<OutcomeRecord>, TrackError> {
    let mut outcomes = Vec::new();
    for line in lines {
        let cmd = Command::parse(line).expect("test lines have a name");
        if let Some(record) = tracker.apply(&cmd)? {
            outcomes.push(record);
        }
    }
    Ok(outcomes)
}

/// A tracker with deck 5 defined, filled and selected, and a game started.
fn started_game(local_seat: &str) -> Tracker<CardRegistry> {
    let mut tracker = tracker();
    feed(
        &mut tracker,
        &[
            "1|$sset|dr:you|userName:Me|pickedDeckId:5",
            "2|$sset|dr:decks|t:DECK|id:5|name:TestDeck",
            "3|$setQuantity|dr:deck5|t:CARD|10:3|11:1",
            "4|$sset|dr:gameMembers|userName:Rival|constructedRank:7|constructedGodRank:0",
            "5|$setRankedMode|him:COMPETITIVE|me:CASUAL",
        ],
    )
    .unwrap();
    feed(&mut tracker, &[format!("6|~iam|{local_seat}").as_str()]).unwrap();
    tracker
}

#[test]
fn test_deck_definition_and_quantities() {
    let mut tracker = tracker();
    feed(
        &mut tracker,
        &[
            "1|$sset|dr:decks|t:DECK|id:5|name:TestDeck",
            "2|$setQuantity|dr:deck5|t:CARD|10:3|11:1",
        ],
    )
    .unwrap();

    let deck = tracker.session().deck(DeckId(5)).unwrap();
    assert_eq!(deck.name, "TestDeck");
    let cards: Vec<_> = deck.cards().map(|dc| (dc.card_id().raw(), dc.quantity())).collect();
    assert_eq!(cards, vec![(10, 3), (11, 1)]);
    assert_eq!(deck.cardcount(), 4);
}

#[test]
fn test_set_quantity_adds_to_existing() {
    let mut tracker = tracker();
    feed(
        &mut tracker,
        &[
            "1|$sset|dr:decks|t:DECK|id:5|name:TestDeck",
            "2|$setQuantity|dr:deck5|t:CARD|10:2",
            "3|$setQuantity|dr:deck5|t:GOLD_CARD|10:1",
            "4|$setQuantity|dr:deck5|t:EMOTE|10:7",
        ],
    )
    .unwrap();

    let deck = tracker.session().deck(DeckId(5)).unwrap();
    assert_eq!(deck.get(CardId::new(10)).unwrap().quantity(), 3);
    assert_eq!(deck.len(), 1);
}

#[test]
fn test_set_quantity_negative_delta() {
    let mut tracker = tracker();
    feed(
        &mut tracker,
        &[
            "1|$sset|dr:decks|t:DECK|id:5|name:TestDeck",
            "2|$setQuantity|dr:deck5|t:CARD|10:3",
            "3|$setQuantity|dr:deck5|t:CARD|10:-1",
        ],
    )
    .unwrap();
    let quantity = |t: &Tracker<CardRegistry>| {
        let deck = t.session().deck(DeckId(5)).unwrap();
        deck.get(CardId::new(10)).unwrap().quantity()
    };
    assert_eq!(quantity(&tracker), 2);

    feed(&mut tracker, &["4|$setQuantity|dr:deck5|t:CARD|10:-9"]).unwrap();
    assert_eq!(quantity(&tracker), 0);
}

#[test]
fn test_set_quantity_saturates() {
    let mut tracker = tracker();
    feed(
        &mut tracker,
        &[
            "1|$sset|dr:decks|t:DECK|id:5|name:TestDeck",
            "2|$setQuantity|dr:deck5|t:CARD|10:2147483647",
            "3|$setQuantity|dr:deck5|t:CARD|10:2147483647",
            "4|$setQuantity|dr:deck5|t:CARD|10:2147483647",
        ],
    )
    .unwrap();

    let deck = tracker.session().deck(DeckId(5)).unwrap();
    assert_eq!(deck.get(CardId::new(10)).unwrap().quantity(), u32::MAX);
    assert_eq!(deck.cardcount(), u32::MAX);
}

#[test]
fn test_set_quantity_unknown_deck_or_card() {
    let mut tracker = tracker();
    let err = feed(&mut tracker, &["1|$setQuantity|dr:deck8|t:CARD|10:2"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownReference);

    feed(&mut tracker, &["2|$sset|dr:decks|t:DECK|id:8|name:X"]).unwrap();
    let err = feed(&mut tracker, &["3|$setQuantity|dr:deck8|t:CARD|4242:2"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownReference);
}

#[test]
fn test_rename_and_clear_room() {
    let mut tracker = tracker();
    feed(
        &mut tracker,
        &[
            "1|$sset|dr:decks|t:DECK|id:5|name:Old",
            "2|$setQuantity|dr:deck5|t:CARD|10:3",
            "3|$set|t:DECK|id:5|name:New",
            "4|$clearRoom|dr:deck5",
            "5|$clearRoom|dr:you",
            "6|$clearRoom",
        ],
    )
    .unwrap();

    let deck = tracker.session().deck(DeckId(5)).unwrap();
    assert_eq!(deck.name, "New");
    assert!(deck.is_empty());

    let err = feed(&mut tracker, &["7|$set|t:DECK|id:6|name:Nope"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownReference);
}

#[test]
fn test_deck_definition_requires_fields() {
    let mut tracker = tracker();
    let err = feed(&mut tracker, &["1|$sset|dr:decks|t:DECK|id:5"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedCommand);
}

#[test]
fn test_game_start_without_selected_deck() {
    let mut tracker = tracker();
    let err = feed(
        &mut tracker,
        &[
            "1|$sset|dr:decks|t:DECK|id:5|name:TestDeck",
            "2|$sset|dr:gameMembers|userName:Rival",
        ],
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidProtocolState);
    assert!(tracker.session().game.is_none());
}

#[test]
fn test_game_start_with_unknown_deck() {
    let mut tracker = tracker();
    let err = feed(
        &mut tracker,
        &["1|$set|t:ACCOUNT|pickedDeckId:9", "2|$sset|dr:gameMembers|userName:Rival"],
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownReference);
}

#[test]
fn test_second_game_start_is_fatal() {
    let mut tracker = started_game("0");
    let err = feed(&mut tracker, &["9|$sset|dr:gameMembers|userName:Again"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidProtocolState);
}

#[test]
fn test_missing_opponent_fields_default() {
    let mut tracker = tracker();
    feed(
        &mut tracker,
        &[
            "1|$sset|dr:decks|t:DECK|id:5|name:TestDeck",
            "2|$set|t:ACCOUNT|pickedDeckId:5",
            "3|$sset|dr:gameMembers",
        ],
    )
    .unwrap();

    let game = tracker.session().game.as_ref().unwrap();
    assert_eq!(game.opponent.name, "*Opponent");
    assert_eq!(game.opponent.rank, "?");
    assert_eq!(game.opponent.god_rank, "?");
}

#[test]
fn test_iam_seats_players() {
    let tracker = started_game("0");
    let game = tracker.session().game.as_ref().unwrap();
    let seating = game.seating.as_ref().unwrap();

    assert_eq!(seating.local, Seat::FIRST);
    assert_eq!(seating.local_player().name, "Me");
    assert_eq!(seating.local_player().deck.cardcount(), 4);
    assert_eq!(seating.opponent_player().name, "Rival(R7)");
    assert_eq!(seating.opponent_player().deck.name, "Opponent");
    assert!(seating.opponent_player().deck.is_empty());
    assert_eq!(game.current_seat, Some(Seat::FIRST));
    assert!(tracker.needs_redisplay());
}

#[test]
fn test_iam_rejects_bad_seat() {
    let mut tracker = tracker();
    feed(
        &mut tracker,
        &[
            "1|$sset|dr:decks|t:DECK|id:5|name:TestDeck",
            "2|$set|t:ACCOUNT|pickedDeckId:5",
            "3|$sset|dr:gameMembers|userName:Rival",
        ],
    )
    .unwrap();
    let err = feed(&mut tracker, &["4|~iam|2"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidProtocolState);
}

#[test]
fn test_iam_without_game_is_ignored() {
    let mut tracker = tracker();
    feed(&mut tracker, &["1|~iam|0"]).unwrap();
    assert!(!tracker.needs_redisplay());
}

#[test]
fn test_local_deck_is_independent_of_template() {
    let mut tracker = started_game("0");
    feed(
        &mut tracker,
        &["7|*createGameCard|500|10|0|CREATURE", "8|#ZoneMove|x|500|deck|0|hand|0"],
    )
    .unwrap();

    let template = tracker.session().deck(DeckId(5)).unwrap();
    assert_eq!(template.get(CardId::new(10)).unwrap().quantity(), 3);

    let game = tracker.session().game.as_ref().unwrap();
    let mine = &game.player(Seat::FIRST).unwrap().deck;
    assert_eq!(mine.get(CardId::new(10)).unwrap().quantity(), 2);
    assert_eq!(mine.get(CardId::new(10)).unwrap().hquantity(), 1);
}

#[test]
fn test_zone_move_round_trip() {
    let mut tracker = started_game("1");
    feed(
        &mut tracker,
        &[
            "7|*createGameCard|500|11|1|CREATURE",
            "8|#ZoneMove|x|500|deck|1|hand|1",
            "9|#ZoneMove|x|500|hand|1|deck|1",
        ],
    )
    .unwrap();

    let game = tracker.session().game.as_ref().unwrap();
    let garmant = game.player(Seat::SECOND).unwrap().deck.get(CardId::new(11)).unwrap();
    assert_eq!((garmant.quantity(), garmant.hquantity()), (1, 0));
}

#[test]
fn test_generated_card_materializes() {
    let mut tracker = started_game("0");
    feed(
        &mut tracker,
        &["7|*createGameCard|600|99|0|CREATURE", "8|#ZoneMove|x|600|limbo|-1|hand|0"],
    )
    .unwrap();

    let game = tracker.session().game.as_ref().unwrap();
    let wisp = game.player(Seat::FIRST).unwrap().deck.get(CardId::new(99)).unwrap();
    assert!(wisp.generated);
    assert_eq!((wisp.quantity(), wisp.hquantity()), (0, 1));
}

#[test]
fn test_opponent_hand_reveals_cards() {
    let mut tracker = started_game("0");
    tracker.take_redisplay();
    feed(
        &mut tracker,
        &[
            "7|*createGameCard|700|12|1|EVENT",
            "8|*createGameCard|701|12|1|EVENT",
            "9|#ZoneMove|x|700|hand|1|graveyard|1",
        ],
    )
    .unwrap();
    assert!(tracker.take_redisplay());

    let quantity = |tracker: &Tracker<CardRegistry>| {
        let game = tracker.session().game.as_ref().unwrap();
        game.player(Seat::SECOND)
            .unwrap()
            .deck
            .get(CardId::new(12))
            .map(|dc| (dc.quantity(), dc.generated))
    };
    assert_eq!(quantity(&tracker), Some((1, false)));

    feed(&mut tracker, &["10|#ZoneMove|x|701|hand|1|board|1"]).unwrap();
    assert_eq!(quantity(&tracker), Some((2, false)));
}

#[test]
fn test_cross_seat_transfer_is_unmodeled() {
    let mut tracker = started_game("0");
    let err = feed(
        &mut tracker,
        &["7|*createGameCard|800|10|1|CREATURE", "8|#ZoneMove|x|800|board|1|hand|0"],
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnmodeledTransfer);
}

#[test]
fn test_unbound_zone_move_is_quiet() {
    let mut tracker = started_game("0");
    tracker.take_redisplay();
    feed(&mut tracker, &["7|#ZoneMove|x|999|deck|0|hand|0"]).unwrap();
    assert!(!tracker.needs_redisplay());
}

#[test]
fn test_catalog_miss_drops_game_card() {
    let mut tracker = started_game("0");
    feed(&mut tracker, &["7|*createGameCard|900|4242|0|CREATURE"]).unwrap();
    let game = tracker.session().game.as_ref().unwrap();
    assert_eq!(game.bound_cards(), 0);
}

#[test]
fn test_player_counters() {
    let mut tracker = started_game("0");
    feed(
        &mut tracker,
        &[
            "7|~playerState|1|18|5|4|22|0",
            "8|#HarvestFaeria|g|3|2|1",
            "9|#FaeriaGain|x|1|3",
            "10|#PayFaeria|x|1|2",
            "11|#PayFaeria|x|1|0",
        ],
    )
    .unwrap();

    let game = tracker.session().game.as_ref().unwrap();
    let rival = game.player(Seat::SECOND).unwrap();
    assert_eq!((rival.health, rival.hand_count, rival.deck_count), (18, 4, 22));
    assert_eq!(rival.harvested, 2);
    assert_eq!(rival.faeria, 1);
}

#[test]
fn test_faeria_counters_saturate() {
    let mut tracker = started_game("0");
    feed(
        &mut tracker,
        &[
            "7|#PayFaeria|x|1|-2147483648",
            "8|#HarvestFaeria|g|3|2147483647|0",
            "9|#HarvestFaeria|g|3|5|0",
            "10|#FaeriaGain|x|0|-2147483648",
            "11|#FaeriaGain|x|0|-1",
        ],
    )
    .unwrap();

    let game = tracker.session().game.as_ref().unwrap();
    assert_eq!(game.player(Seat::SECOND).unwrap().faeria, i32::MAX);
    let me = game.player(Seat::FIRST).unwrap();
    assert_eq!(me.harvested, i32::MAX);
    assert_eq!(me.faeria, i32::MIN);
}

#[test]
fn test_player_state_before_seats() {
    let mut tracker = tracker();
    feed(
        &mut tracker,
        &[
            "1|$sset|dr:decks|t:DECK|id:5|name:TestDeck",
            "2|$set|t:ACCOUNT|pickedDeckId:5",
            "3|$sset|dr:gameMembers|userName:Rival",
        ],
    )
    .unwrap();
    let err = feed(&mut tracker, &["4|~playerState|0|20|0|5|25|0"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownReference);
}

#[test]
fn test_lands_follow_current_turn() {
    let mut tracker = started_game("0");
    feed(
        &mut tracker,
        &[
            "7|#CreateTokenLand|a|b|c|red",
            "8|~newTurn|1|2",
            "9|#CreateTokenLand|a|b|c|human",
            "10|#CreateTokenLand|a|b|c|human",
        ],
    )
    .unwrap();

    let game = tracker.session().game.as_ref().unwrap();
    assert_eq!(game.turn, 2);
    assert_eq!(game.player(Seat::FIRST).unwrap().lands[LandColor::Red], 1);
    assert_eq!(game.player(Seat::SECOND).unwrap().lands[LandColor::Neutral], 2);

    let err = feed(&mut tracker, &["11|#CreateTokenLand|a|b|c|purple"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownReference);
}

#[test]
fn test_victory_builds_outcome() {
    let mut tracker = started_game("1");
    let outcomes = feed(
        &mut tracker,
        &[
            "7|~playerState|0|0|0|3|15|0",
            "8|~newTurn|0|9",
            "9|$victory|2|HEALTH",
        ],
    )
    .unwrap();

    assert_eq!(outcomes.len(), 1);
    let record = &outcomes[0];
    assert_eq!(record.stamp, STAMP);
    assert!(!record.first);
    assert!(record.victory);
    assert_eq!(record.endreason, "HEALTH");
    assert_eq!(record.turn, 9);
    assert_eq!(record.opponent.mode, "COMPETITIVE");
    assert_eq!(record.me.mode, "CASUAL");
    assert_eq!(record.opponent.name, "Rival");
    assert_eq!(record.opponent.health, 0);
    assert_eq!(record.me.deckname, "TestDeck");
    assert_eq!(record.me.deck.len(), 2);

    // The game stays until the stop event.
    assert!(tracker.session().game.is_some());
    feed(&mut tracker, &["10|$stopGame"]).unwrap();
    assert!(tracker.session().game.is_none());
    assert!(tracker.session().deck(DeckId(5)).is_some());
}

#[test]
fn test_victory_without_game() {
    let mut tracker = tracker();
    let err = feed(&mut tracker, &["1|$victory|1|HEALTH"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidProtocolState);
}

#[test]
fn test_ranked_mode_without_game() {
    let mut tracker = tracker();
    let err = feed(&mut tracker, &["1|$setRankedMode|him:CASUAL|me:CASUAL"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidProtocolState);
}

#[test]
fn test_world_welcome_resets_session() {
    let mut tracker = started_game("0");
    feed(&mut tracker, &["20|$welcome|source:GameServer"]).unwrap();
    assert!(tracker.session().game.is_some());

    feed(&mut tracker, &["21|$welcome|source:WorldServer"]).unwrap();
    let session = tracker.session();
    assert!(session.decks.is_empty());
    assert!(session.selected_deck.is_none());
    assert!(session.user_name.is_none());
    assert!(session.game.is_none());

    let err = feed(&mut tracker, &["22|$clearRoom|dr:deck5"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownReference);
}

#[test]
fn test_malformed_numbers_are_fatal() {
    let mut tracker = started_game("0");
    let err = feed(&mut tracker, &["7|~newTurn|one|2"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedCommand);
}
