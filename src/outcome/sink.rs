//! Outcome sinks.
//!
//! The tracker hands each finished game's record to an `OutcomeSink`. Where
//! the record ends up (and how files are rotated) is the sink's business.

use std::io::Write;

use super::record::OutcomeRecord;
use crate::core::TrackError;

/// Destination for finished-game records.
pub trait OutcomeSink {
    /// Persist one record. Errors stop the run.
    fn record(&mut self, outcome: &OutcomeRecord) -> Result<(), TrackError>;
}

/// Collects records in memory.
impl OutcomeSink for Vec<OutcomeRecord> {
    fn record(&mut self, outcome: &OutcomeRecord) -> Result<(), TrackError> {
        self.push(outcome.clone());
        Ok(())
    }
}

/// Writes one JSON object per line, flushing after each record.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutcomeSink for JsonLinesSink<W> {
    fn record(&mut self, outcome: &OutcomeRecord) -> Result<(), TrackError> {
        serde_json::to_writer(&mut self.writer, outcome)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
