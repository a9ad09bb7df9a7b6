//! Deck inference from zone moves.
//!
//! The opponent's deck starts empty and the local deck only knows its
//! list. Every `#ZoneMove` of a bound game card is classified against the
//! seats involved, then applied to the matching deck:
//!
//! | from seat | to seat | from zone | outcome |
//! |-----------|---------|-----------|---------|
//! | local     | local   | any       | shift one copy between zone counters |
//! | -1        | local   | any       | materialize into deck or hand |
//! | other     | local   | any       | unmodeled, fatal |
//! | opponent  | any     | hand      | reveal one copy of the opponent's deck |
//!
//! Anything else is ignored.

use tracing::trace;

use super::session::Session;
use super::{Applied, Env};
use crate::core::{Seat, TrackError};
use crate::model::{DeckCard, GameCardId, Zone};
use crate::protocol::Command;

/// Wire seat for cards coming from outside play.
pub const NO_SEAT: i32 = -1;

/// What a zone move means for the tracked decks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inference {
    /// A local card moved between two of the local player's zones.
    LocalTransfer { from: Zone, to: Zone },
    /// A card was created for the local player.
    Materialize { to: Zone },
    /// An opponent card left the opponent's hand.
    Reveal,
    /// A card crossed from a seat that is not the local one into the local
    /// player's zones.
    Unmodeled,
    Ignored,
}

/// Classify a move between zones and seats, relative to the local seat.
///
/// ```
/// use faeria_track::core::Seat;
/// use faeria_track::model::Zone;
/// use faeria_track::tracker::inference::{classify, Inference};
///
/// let local = Seat::FIRST;
/// assert_eq!(
///     classify(local, Zone::Deck, 0, Zone::Hand, 0),
///     Inference::LocalTransfer { from: Zone::Deck, to: Zone::Hand },
/// );
/// assert_eq!(classify(local, Zone::Hand, 1, Zone::Other, 1), Inference::Reveal);
/// assert_eq!(classify(local, Zone::Other, 1, Zone::Other, 1), Inference::Ignored);
/// ```
#[must_use]
pub fn classify(local: Seat, from_zone: Zone, from_seat: i32, to_zone: Zone, to_seat: i32) -> Inference {
    let local = local.wire();
    let opponent = 1 - local;

    if to_seat == local {
        if from_seat == local {
            return Inference::LocalTransfer {
                from: from_zone,
                to: to_zone,
            };
        }
        if from_seat == NO_SEAT {
            return match to_zone {
                Zone::Deck | Zone::Hand => Inference::Materialize { to: to_zone },
                Zone::Other => Inference::Ignored,
            };
        }
        return Inference::Unmodeled;
    }

    if from_seat == opponent && from_zone == Zone::Hand {
        return Inference::Reveal;
    }
    Inference::Ignored
}

pub(crate) fn zone_move(session: &mut Session, _env: &Env<'_>, cmd: &Command<'_>) -> Result<Applied, TrackError> {
    cmd.expect_args(6)?;
    let instance = GameCardId(cmd.num(1)?);
    let from_zone = Zone::from_wire(cmd.arg(2)?);
    let from_seat: i32 = cmd.num(3)?;
    let to_zone = Zone::from_wire(cmd.arg(4)?);
    let to_seat: i32 = cmd.num(5)?;

    let Some(game) = session.game.as_mut() else {
        return Ok(Applied::Quiet);
    };
    let Some(local) = game.local_seat() else {
        return Ok(Applied::Quiet);
    };
    let Some(bound) = game.resolve(instance) else {
        trace!(%instance, "zone move of an unbound card");
        return Ok(Applied::Quiet);
    };
    let card = bound.card.clone();

    let inference = classify(local, from_zone, from_seat, to_zone, to_seat);
    trace!(%instance, card = %card.name, ?inference, "zone move");

    let Some(seating) = game.seating.as_mut() else {
        return Ok(Applied::Quiet);
    };
    match inference {
        Inference::LocalTransfer { from, to } => {
            seating.players[local]
                .deck
                .locate_or_insert_with(&card, DeckCard::generated)
                .shift(from, to);
        }
        Inference::Materialize { to } => {
            seating.players[local]
                .deck
                .locate_or_insert_with(&card, DeckCard::generated)
                .arrive(to);
        }
        Inference::Reveal => {
            seating.players[local.other()]
                .deck
                .locate_or_insert_with(&card, |c| DeckCard::new(c, 0))
                .adjust_quantity(1);
        }
        Inference::Unmodeled => {
            return Err(TrackError::UnmodeledTransfer {
                card: card.id.raw(),
                from_seat,
                to_seat,
            });
        }
        Inference::Ignored => return Ok(Applied::Quiet),
    }
    Ok(Applied::Redisplay)
}
