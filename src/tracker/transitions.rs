//! Account, deck and game-lifecycle transitions.
//!
//! Each transition takes the session, the environment and the decoded
//! command, and reports what changed. Zone moves live in `inference`.

use std::sync::Arc;

use tracing::{debug, info, trace};

use super::session::{seated_player, Session};
use super::{Applied, Env};
use crate::cards::CardId;
use crate::core::{Reference, Seat, TrackError};
use crate::model::{Deck, DeckCard, DeckId, Game, GameCard, GameCardId, LandColor, OpponentInfo, UNKNOWN};
use crate::outcome::OutcomeRecord;
use crate::protocol::command::deck_room;
use crate::protocol::{ArgMap, Command, CommandTag};

/// Selected-deck value meaning "nothing picked".
const NO_DECK: u32 = 0;

fn selection(id: u32) -> Option<DeckId> {
    (id != NO_DECK).then_some(DeckId(id))
}

pub(crate) fn welcome(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    if cmd.arg_map().get("source") == Some("WorldServer") {
        info!("world server welcome, resetting session");
        session.reset();
    }
    Ok(Applied::Quiet)
}

pub(crate) fn set(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    const NAME: &str = CommandTag::Set.name();
    let args = cmd.arg_map();

    match args.get("t") {
        Some("ACCOUNT") => {
            if let Some(id) = args.num::<u32>(cmd, "pickedDeckId")? {
                debug!(deck = id, "account deck selection");
                session.selected_deck = selection(id);
            }
        }
        Some("DECK") => {
            let (Some(id), Some(name)) = (args.num::<u32>(cmd, "id")?, args.get("name")) else {
                return Ok(Applied::Quiet);
            };
            let deck = session.deck_mut(NAME, DeckId(id))?;
            debug!(deck = id, from = %deck.name, to = name, "deck renamed");
            deck.name = name.to_string();
        }
        _ => {}
    }
    Ok(Applied::Quiet)
}

pub(crate) fn clear_room(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    const NAME: &str = CommandTag::ClearRoom.name();
    let Some(room) = cmd.arg_map().get("dr") else {
        return Ok(Applied::Quiet);
    };
    let Some(id) = deck_room(cmd, room)? else {
        return Ok(Applied::Quiet);
    };

    session.deck_mut(NAME, DeckId(id))?.clear();
    Ok(Applied::Quiet)
}

/// `$sset` carries three unrelated events, picked by the `dr` room.
pub(crate) fn server_set(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    let args = cmd.arg_map();

    match args.get("dr") {
        Some("you") => self_identity(session, cmd, &args),
        Some("decks") if args.get("t") == Some("DECK") => define_deck(session, cmd, &args),
        Some("gameMembers") => start_game(session, &args),
        _ => Ok(Applied::Quiet),
    }
}

fn self_identity(session: &mut Session, cmd: &Command<'_>, args: &ArgMap<'_>) -> Result<Applied, TrackError> {
    if let Some(id) = args.num::<u32>(cmd, "pickedDeckId")? {
        session.selected_deck = selection(id);
    }
    if let Some(name) = args.get("userName") {
        session.user_name = Some(name.to_string());
    }
    debug!(deck = ?session.selected_deck, user = ?session.user_name, "self identity");
    Ok(Applied::Quiet)
}

fn define_deck(session: &mut Session, cmd: &Command<'_>, args: &ArgMap<'_>) -> Result<Applied, TrackError> {
    let name = args
        .get("name")
        .filter(|name| !name.is_empty())
        .ok_or_else(|| cmd.malformed("deck definition without a name"))?;
    let id = args
        .num::<u32>(cmd, "id")?
        .ok_or_else(|| cmd.malformed("deck definition without an id"))?;

    debug!(deck = id, name, "deck defined");
    session.decks.insert(DeckId(id), Deck::new(DeckId(id), name));
    Ok(Applied::Quiet)
}

fn start_game(session: &mut Session, args: &ArgMap<'_>) -> Result<Applied, TrackError> {
    const NAME: &str = "$sset gameMembers";

    if session.game.is_some() {
        return Err(TrackError::state(NAME, "new game while a game is in progress"));
    }
    let deck_id = session
        .selected_deck
        .ok_or_else(|| TrackError::state(NAME, "new game with no deck selected"))?;
    let template = session
        .deck(deck_id)
        .ok_or_else(|| TrackError::unknown(NAME, Reference::Deck, deck_id))?;

    let opponent = OpponentInfo {
        name: args.get("userName").unwrap_or("*Opponent").to_string(),
        rank: args.get("constructedRank").unwrap_or(UNKNOWN).to_string(),
        god_rank: args.get("constructedGodRank").unwrap_or(UNKNOWN).to_string(),
    };
    info!(deck = %template.name, opponent = %opponent.name, "game starting");
    session.game = Some(Game::new(template.clone(), opponent));
    Ok(Applied::Quiet)
}

pub(crate) fn set_quantity(session: &mut Session, env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    const NAME: &str = CommandTag::SetQuantity.name();
    let args = cmd.arg_map();

    let Some(room) = args.get("dr") else {
        return Ok(Applied::Quiet);
    };
    if !matches!(args.get("t"), Some("CARD" | "GOLD_CARD")) {
        return Ok(Applied::Quiet);
    }
    let Some(id) = deck_room(cmd, room)? else {
        return Ok(Applied::Quiet);
    };

    let deck = session.deck_mut(NAME, DeckId(id))?;
    for pair in cmd.args.iter() {
        let Some((card_id, quantity)) = pair.split_once(':') else {
            return Err(cmd.malformed(format!("card entry {pair:?} is not id:quantity")));
        };
        if matches!(card_id, "dr" | "t") {
            continue;
        }
        let (Ok(card_id), Ok(quantity)) = (card_id.parse::<u32>(), quantity.parse::<i32>()) else {
            return Err(cmd.malformed(format!("card entry {pair:?} is not numeric")));
        };

        let card = env
            .catalog
            .lookup(CardId::new(card_id))
            .ok_or_else(|| TrackError::unknown(NAME, Reference::Card, card_id))?;
        deck.locate_or_insert_with(&card, |c| DeckCard::new(c, 0))
            .adjust_quantity(quantity);
    }
    Ok(Applied::Quiet)
}

pub(crate) fn iam(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    const NAME: &str = CommandTag::Iam.name();
    let user = session.user_name.clone();
    let Some(game) = session.game.as_mut() else {
        return Ok(Applied::Quiet);
    };
    let raw_seat: i32 = cmd.num(0)?;

    let seat = Seat::from_wire(raw_seat)
        .ok_or_else(|| TrackError::state(NAME, "local seat must be 0 or 1"))?;
    game.assign_seats(seat, user.as_deref().unwrap_or(UNKNOWN));
    info!(%seat, opponent = %game.opponent.display_name(), "seats assigned");
    Ok(Applied::Redisplay)
}

pub(crate) fn set_ranked_mode(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    let args = cmd.arg_map();
    let game = session.require_game(CommandTag::SetRankedMode.name())?;

    game.opponent_mode = args.get("him").unwrap_or(UNKNOWN).to_string();
    game.self_mode = args.get("me").unwrap_or(UNKNOWN).to_string();
    Ok(Applied::Quiet)
}

pub(crate) fn player_state(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    cmd.expect_args(5)?;
    let seat: i32 = cmd.num(0)?;
    let health: i32 = cmd.num(1)?;
    let hand_count: i32 = cmd.num(3)?;
    let deck_count: i32 = cmd.num(4)?;
    let Some(game) = session.game.as_mut() else {
        return Ok(Applied::Quiet);
    };

    let player = seated_player(game, CommandTag::PlayerState.name(), seat)?;
    player.health = health;
    player.hand_count = hand_count;
    player.deck_count = deck_count;
    Ok(Applied::Redisplay)
}

pub(crate) fn harvest_faeria(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    cmd.expect_args(4)?;
    let amount: i32 = cmd.num(2)?;
    let seat: i32 = cmd.num(3)?;
    let Some(game) = session.game.as_mut() else {
        return Ok(Applied::Quiet);
    };

    let player = seated_player(game, CommandTag::HarvestFaeria.name(), seat)?;
    player.harvested = player.harvested.saturating_add(amount);
    Ok(Applied::Quiet)
}

fn adjust_faeria(session: &mut Session, cmd: &Command<'_>, command: &'static str, sign: i32) -> Result<Applied, TrackError> {
    cmd.expect_args(3)?;
    let seat: i32 = cmd.num(1)?;
    let amount: i32 = cmd.num(2)?;
    if amount == 0 {
        return Ok(Applied::Quiet);
    }
    let Some(game) = session.game.as_mut() else {
        return Ok(Applied::Quiet);
    };

    let player = seated_player(game, command, seat)?;
    player.faeria = player.faeria.saturating_add(amount.saturating_mul(sign));
    Ok(Applied::Redisplay)
}

pub(crate) fn pay_faeria(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    adjust_faeria(session, cmd, CommandTag::PayFaeria.name(), -1)
}

pub(crate) fn gain_faeria(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    adjust_faeria(session, cmd, CommandTag::FaeriaGain.name(), 1)
}

pub(crate) fn new_turn(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    const NAME: &str = CommandTag::NewTurn.name();
    let raw_seat: i32 = cmd.num(0)?;
    let turn: u32 = cmd.num(1)?;
    let Some(game) = session.game.as_mut() else {
        return Ok(Applied::Quiet);
    };

    let seat = Seat::from_wire(raw_seat)
        .ok_or_else(|| TrackError::unknown(NAME, Reference::Seat, raw_seat))?;
    game.turn = turn;
    game.current_seat = Some(seat);
    trace!(turn, %seat, "new turn");
    Ok(Applied::Redisplay)
}

pub(crate) fn create_game_card(session: &mut Session, env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    cmd.expect_args(4)?;
    let instance = GameCardId(cmd.num(0)?);
    let card_id = CardId::new(cmd.num(1)?);
    let owner: i32 = cmd.num(2)?;
    let kind = cmd.arg(3)?;

    let Some(card) = env.catalog.lookup(card_id) else {
        debug!(%instance, %card_id, "game card not in catalog, dropped");
        return Ok(Applied::Quiet);
    };
    let Some(game) = session.game.as_mut() else {
        return Ok(Applied::Quiet);
    };

    trace!(%instance, card = %card.name, owner, kind, "game card bound");
    game.bind_card(
        instance,
        GameCard {
            owner,
            kind: kind.to_string(),
            card: Arc::clone(&card),
        },
    );
    Ok(Applied::Quiet)
}

/// Observation point for cards entering the board. Nothing is tracked yet.
pub(crate) fn come_into_play(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    cmd.expect_args(3)?;
    let instance = GameCardId(cmd.num(1)?);
    let seat: i32 = cmd.num(2)?;
    let Some(game) = session.game.as_ref() else {
        return Ok(Applied::Quiet);
    };

    if let Some(bound) = game.resolve(instance) {
        trace!(%instance, card = %bound.card.name, seat, "come into play");
    }
    Ok(Applied::Quiet)
}

pub(crate) fn start_game_notice(_session: &mut Session, _env: &Env<'_>, _cmd: &Command<'_>) -> Result<Applied, TrackError> {
    info!("start game");
    Ok(Applied::Quiet)
}

pub(crate) fn stop_game(session: &mut Session, _env: &Env<'_>, _cmd: &Command<'_>) -> Result<Applied, TrackError> {
    info!("stop game");
    session.game = None;
    Ok(Applied::Quiet)
}

pub(crate) fn victory(session: &mut Session, env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    let game = session.require_game(CommandTag::Victory.name())?;
    cmd.expect_args(2)?;
    let winner: i32 = cmd.num(0)?;
    let reason = cmd.arg(1)?;

    let record = OutcomeRecord::from_game(game, winner, reason, env.clock.stamp())?;
    info!(
        "Game outcome vs {}: {} - Reason: {}",
        game.opponent.name,
        record.result_word(),
        reason
    );
    Ok(Applied::Finished(Box::new(record)))
}

pub(crate) fn create_token_land(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    const NAME: &str = CommandTag::CreateTokenLand.name();
    cmd.expect_args(4)?;
    let raw_color = cmd.arg(3)?;
    let color = LandColor::from_wire(raw_color)
        .ok_or_else(|| TrackError::unknown(NAME, Reference::LandColor, raw_color))?;

    let game = session.require_game(NAME)?;
    let seat = game
        .current_seat
        .ok_or_else(|| TrackError::state(NAME, "no current player"))?;
    let player = game
        .player_mut(seat)
        .ok_or_else(|| TrackError::state(NAME, "seats were never assigned"))?;
    player.lands.gain(color);
    Ok(Applied::Redisplay)
}
