//! Outcome records: construction, sinks, and history summaries.

pub mod history;
pub mod record;
pub mod sink;

pub use history::{write_table, HistoryRow, HEADER_EVERY};
pub use record::{DeckEntry, LocalSide, OpponentSide, OutcomeRecord};
pub use sink::{JsonLinesSink, OutcomeSink};
