//! Command decoding.
//!
//! A message is a run of `\n`-separated commands. Each command is
//! `|`-separated: sequence number, command name, then arguments. Arguments
//! are positional (`3`) or keyed (`dr:deck5`).
//!
//! ```
//! use faeria_track::protocol::{decode_message, Command};
//!
//! let commands: Vec<Command<'_>> =
//!     decode_message("7|~newTurn|1|4\n\n8|#PayFaeria|x|1|3\n").collect();
//! assert_eq!(commands.len(), 2);
//! assert_eq!(commands[0].name, "~newTurn");
//! assert_eq!(commands[1].args.as_slice(), &["x", "1", "3"]);
//! ```

use std::str::FromStr;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::TrackError;

/// Inline capacity covers every command the tracker handles.
pub type Args<'a> = SmallVec<[&'a str; 8]>;

/// One decoded command borrowing from its message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command<'a> {
    pub seq: &'a str,
    pub name: &'a str,
    pub args: Args<'a>,
}

impl<'a> Command<'a> {
    /// Split one command line. Returns `None` for lines with fewer than two
    /// fields, which the protocol uses for keep-alives and noise.
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.trim_end().split('|');
        let seq = fields.next()?;
        let name = fields.next()?;
        Some(Self {
            seq,
            name,
            args: fields.collect(),
        })
    }

    /// Keyed view of the arguments.
    #[must_use]
    pub fn arg_map(&self) -> ArgMap<'a> {
        ArgMap::from_args(&self.args)
    }

    /// Positional argument as text.
    pub fn arg(&self, index: usize) -> Result<&'a str, TrackError> {
        self.args
            .get(index)
            .copied()
            .ok_or_else(|| self.malformed(format!("missing argument {index}")))
    }

    /// Positional argument parsed as a number.
    pub fn num<T: FromStr>(&self, index: usize) -> Result<T, TrackError> {
        let raw = self.arg(index)?;
        raw.trim()
            .parse()
            .map_err(|_| self.malformed(format!("argument {index} ({raw:?}) is not a number")))
    }

    /// Require at least `count` positional arguments.
    pub fn expect_args(&self, count: usize) -> Result<(), TrackError> {
        if self.args.len() < count {
            return Err(self.malformed(format!(
                "expected {count} arguments, got {}",
                self.args.len()
            )));
        }
        Ok(())
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>) -> TrackError {
        TrackError::MalformedCommand {
            command: self.name.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.seq, self.name)?;
        for arg in &self.args {
            write!(f, "|{arg}")?;
        }
        Ok(())
    }
}

/// Split a completed message into commands, skipping empty lines.
pub fn decode_message(message: &str) -> impl Iterator<Item = Command<'_>> {
    message
        .split('\n')
        .filter(|line| !line.is_empty())
        .filter_map(Command::parse)
}

/// Keyed view over `key:value` arguments.
///
/// Values keep any further `:`; entries without a `:` are not keyed and are
/// left out.
#[derive(Clone, Debug, Default)]
pub struct ArgMap<'a> {
    entries: FxHashMap<&'a str, &'a str>,
}

impl<'a> ArgMap<'a> {
    /// Index every `key:value` argument.
    #[must_use]
    pub fn from_args(args: &[&'a str]) -> Self {
        let entries = args.iter().filter_map(|arg| arg.split_once(':')).collect();
        Self { entries }
    }

    /// Value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries.get(key).copied()
    }

    /// Value parsed as a number. Absent keys are `Ok(None)`.
    pub fn num<T: FromStr>(&self, command: &Command<'_>, key: &str) -> Result<Option<T>, TrackError> {
        self.get(key)
            .map(|raw| {
                raw.trim().parse().map_err(|_| {
                    command.malformed(format!("{key} ({raw:?}) is not a number"))
                })
            })
            .transpose()
    }

    /// Number of keyed arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no argument is keyed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Numeric suffix of a `deckN` room reference.
///
/// Returns `None` if the reference does not name a deck room, and an error
/// if it does but the suffix is not a number.
pub(crate) fn deck_room(command: &Command<'_>, room: &str) -> Result<Option<u32>, TrackError> {
    match room.strip_prefix("deck") {
        Some(id) => id
            .parse()
            .map(Some)
            .map_err(|_| command.malformed(format!("room {room:?} has no deck id"))),
        None => Ok(None),
    }
}
