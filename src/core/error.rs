//! Error taxonomy for the tracker.
//!
//! Every fatal condition surfaces as a `TrackError`. The run stops on the
//! first one: there is no per-command isolation or retry.

use thiserror::Error;

/// Which capture line failed its pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureLine {
    Header,
    Data,
}

impl std::fmt::Display for CaptureLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureLine::Header => write!(f, "header"),
            CaptureLine::Data => write!(f, "data"),
        }
    }
}

/// What kind of id a command referenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reference {
    Deck,
    Card,
    Seat,
    LandColor,
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Deck => write!(f, "deck"),
            Reference::Card => write!(f, "card"),
            Reference::Seat => write!(f, "seat"),
            Reference::LandColor => write!(f, "land color"),
        }
    }
}

/// Coarse classification of a `TrackError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedCapture,
    MalformedCommand,
    UnknownReference,
    InvalidProtocolState,
    UnmodeledTransfer,
    Sink,
}

/// Fatal tracking error. The run stops at the first one.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("malformed capture {line_kind} line: {line:?}")]
    MalformedCapture { line_kind: CaptureLine, line: String },

    #[error("malformed {command} command: {reason}")]
    MalformedCommand { command: String, reason: String },

    #[error("{command}: unknown {reference} {id}")]
    UnknownReference {
        command: &'static str,
        reference: Reference,
        id: String,
    },

    #[error("{command}: {reason}")]
    InvalidProtocolState {
        command: &'static str,
        reason: &'static str,
    },

    #[error("zone move of card {card} from seat {from_seat} to seat {to_seat} is not modeled")]
    UnmodeledTransfer {
        card: u32,
        from_seat: i32,
        to_seat: i32,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("outcome serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackError {
    pub(crate) fn unknown(command: &'static str, reference: Reference, id: impl ToString) -> Self {
        TrackError::UnknownReference {
            command,
            reference,
            id: id.to_string(),
        }
    }

    pub(crate) fn state(command: &'static str, reason: &'static str) -> Self {
        TrackError::InvalidProtocolState { command, reason }
    }

    /// Classify the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackError::MalformedCapture { .. } => ErrorKind::MalformedCapture,
            TrackError::MalformedCommand { .. } => ErrorKind::MalformedCommand,
            TrackError::UnknownReference { .. } => ErrorKind::UnknownReference,
            TrackError::InvalidProtocolState { .. } => ErrorKind::InvalidProtocolState,
            TrackError::UnmodeledTransfer { .. } => ErrorKind::UnmodeledTransfer,
            TrackError::Io(_) | TrackError::Json(_) => ErrorKind::Sink,
        }
    }
}
