//! The session tracker.
//!
//! `Tracker` owns the whole session and applies decoded commands to it one
//! at a time. Each command is mapped once onto a `CommandTag`, and the tag
//! onto a fixed transition function; unknown command names are ignored.
//!
//! ## Signals
//!
//! A transition reports what it changed through `Applied`:
//! - `Quiet`: nothing displayable changed
//! - `Redisplay`: the snapshot is stale
//! - `Finished`: a game ended and produced an outcome record
//!
//! The redisplay flag accumulates across the commands of one message and is
//! cleared by whoever renders it.
//!
//! ## Example
//!
//! ```
//! use faeria_track::cards::CardRegistry;
//! use faeria_track::model::DeckId;
//! use faeria_track::protocol::Command;
//! use faeria_track::tracker::Tracker;
//!
//! let mut tracker = Tracker::new(CardRegistry::new());
//! let cmd = Command::parse("1|$sset|dr:decks|t:DECK|id:5|name:TestDeck").unwrap();
//! tracker.apply(&cmd).unwrap();
//! assert_eq!(tracker.session().deck(DeckId(5)).unwrap().name, "TestDeck");
//! ```

pub mod dispatch;
pub mod inference;
pub mod session;
mod transitions;

use tracing::debug;

use crate::cards::CardCatalog;
use crate::core::TrackError;
use crate::display::Snapshot;
use crate::outcome::OutcomeRecord;
use crate::protocol::{decode_message, Command, CommandTag};

pub use dispatch::{transition, Transition};
pub use inference::{classify, Inference};
pub use session::Session;

/// What a transition changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    Quiet,
    Redisplay,
    Finished(Box<OutcomeRecord>),
}

/// Source of outcome timestamps.
pub trait Clock {
    /// Current local time as `%Y%m%dT%H%M%S`.
    fn stamp(&self) -> String;
}

/// Wall-clock local time.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn stamp(&self) -> String {
        chrono::Local::now().format("%Y%m%dT%H%M%S").to_string()
    }
}

/// Always returns the same stamp.
#[derive(Clone, Debug)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn stamp(&self) -> String {
        self.0.clone()
    }
}

/// Read-only collaborators handed to every transition.
pub struct Env<'a> {
    pub catalog: &'a dyn CardCatalog,
    pub clock: &'a dyn Clock,
}

/// Passive protocol tracker: applies decoded commands to a `Session`.
pub struct Tracker<C: CardCatalog> {
    catalog: C,
    clock: Box<dyn Clock>,
    session: Session,
    needs_redisplay: bool,
}

impl<C: CardCatalog> Tracker<C> {
    /// Tracker stamping outcomes with the local wall clock.
    pub fn new(catalog: C) -> Self {
        Self::with_clock(catalog, LocalClock)
    }

    /// Tracker stamping outcomes with `clock`.
    pub fn with_clock(catalog: C, clock: impl Clock + 'static) -> Self {
        Self {
            catalog,
            clock: Box::new(clock),
            session: Session::new(),
            needs_redisplay: false,
        }
    }

    /// Current tracker state.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Catalog used to resolve card ids.
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Apply one command.
    ///
    /// Returns the outcome record when the command finished a game. A
    /// returned error is fatal for the run; the session is left as the
    /// failing transition found it.
    pub fn apply(&mut self, cmd: &Command<'_>) -> Result<Option<OutcomeRecord>, TrackError> {
        let Some(tag) = CommandTag::from_name(cmd.name) else {
            return Ok(None);
        };
        debug!(seq = cmd.seq, command = %tag, args = cmd.args.len(), "dispatch");

        let env = Env {
            catalog: &self.catalog,
            clock: self.clock.as_ref(),
        };
        let applied = transition(tag)(&mut self.session, &env, cmd)?;

        match applied {
            Applied::Quiet => Ok(None),
            Applied::Redisplay => {
                self.needs_redisplay = true;
                Ok(None)
            }
            Applied::Finished(record) => Ok(Some(*record)),
        }
    }

    /// Apply every command of a completed message, collecting outcomes.
    pub fn apply_message(&mut self, message: &str) -> Result<Vec<OutcomeRecord>, TrackError> {
        let mut outcomes = Vec::new();
        for cmd in decode_message(message) {
            if let Some(record) = self.apply(&cmd)? {
                outcomes.push(record);
            }
        }
        Ok(outcomes)
    }

    /// Whether displayable state changed since the last redisplay.
    #[must_use]
    pub fn needs_redisplay(&self) -> bool {
        self.needs_redisplay
    }

    /// Read and clear the redisplay flag.
    pub fn take_redisplay(&mut self) -> bool {
        std::mem::take(&mut self.needs_redisplay)
    }

    /// Display view of the active game, once seats are assigned.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.session.game.as_ref().and_then(Snapshot::of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, CardRegistry};
    use crate::core::ErrorKind;

    fn tracker() -> Tracker<CardRegistry> {
        let catalog: CardRegistry = [Card::new(CardId::new(10), "Elk")].into_iter().collect();
        Tracker::with_clock(catalog, FixedClock("20261018T120000".into()))
    }

    #[test]
    fn test_unknown_command_is_ignored() {
        let mut tracker = tracker();
        let cmd = Command::parse("1|$chat|hello").unwrap();
        assert_eq!(tracker.apply(&cmd).unwrap(), None);
        assert!(!tracker.needs_redisplay());
    }

    #[test]
    fn test_redisplay_flag_accumulates_until_taken() {
        let mut tracker = tracker();
        tracker
            .apply_message(
                "1|$sset|dr:decks|t:DECK|id:5|name:Ramp\n\
                 2|$set|t:ACCOUNT|pickedDeckId:5\n\
                 3|$sset|dr:gameMembers|userName:Bob|constructedRank:3|constructedGodRank:0\n\
                 4|~iam|0\n",
            )
            .unwrap();
        assert!(tracker.needs_redisplay());
        assert!(tracker.take_redisplay());
        assert!(!tracker.needs_redisplay());
        assert!(tracker.snapshot().is_some());
    }

    #[test]
    fn test_error_kind_surfaces() {
        let mut tracker = tracker();
        let err = tracker
            .apply(&Command::parse("1|$victory|1|HEALTH").unwrap())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProtocolState);
    }
}
