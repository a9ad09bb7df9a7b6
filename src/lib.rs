//! # faeria-track
//!
//! Passive deck and game-state tracker for captured Faeria protocol traffic.
//!
//! The tracker never talks to the game. It reads the text output of a
//! packet-capture tool, reassembles the server's messages, decodes the
//! line-oriented command protocol and replays every command against an
//! in-memory model of decks, players and the active game.
//!
//! ## Design Principles
//!
//! 1. **Observation only**: all state is derived from observed commands.
//!    The opponent's deck starts empty and is filled in by inference.
//!
//! 2. **One owner**: a single `Session` value holds everything the tracker
//!    knows, and every transition receives it explicitly.
//!
//! 3. **Fail loudly**: malformed input and protocol states the model cannot
//!    explain stop the run with a typed `TrackError`.
//!
//! ## Modules
//!
//! - `core`: Seats, per-seat storage and the error taxonomy
//! - `config`: Ports, stream filtering, replay pacing and log file names
//! - `capture`: Capture-tool demultiplexer
//! - `protocol`: Command decoding and command names
//! - `cards`: Card catalog and the bootstrap loader
//! - `model`: Decks, players, lands and the active game
//! - `tracker`: Dispatcher, transitions and zone-move inference
//! - `outcome`: Outcome records, sinks and history rows
//! - `display`: Snapshot projection for renderers
//! - `pipeline`: Line-driven run loop

pub mod capture;
pub mod cards;
pub mod config;
pub mod core;
pub mod display;
pub mod model;
pub mod outcome;
pub mod pipeline;
pub mod protocol;
pub mod tracker;

// Re-export commonly used types
pub use crate::core::{ErrorKind, Seat, SeatMap, TrackError};

pub use crate::config::{StreamFilter, TrackerConfig};

pub use crate::cards::{Card, CardCatalog, CardId, CardRegistry};

pub use crate::model::{Deck, DeckCard, DeckId, Game, LandColor, Lands, Player};

pub use crate::outcome::{JsonLinesSink, OutcomeRecord, OutcomeSink};

pub use crate::display::{DrawChance, Snapshot};

pub use crate::pipeline::{CaptureObserver, Pipeline, RunSummary};

pub use crate::tracker::{Applied, Session, Tracker};
