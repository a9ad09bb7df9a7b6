//! Line-driven run loop.
//!
//! `Pipeline` reads capture lines, reassembles messages, decodes commands
//! and applies them to the tracker. Side effects outside the tracker go
//! through two seams: a `CaptureObserver` for raw lines, decoded commands
//! and redisplays, and an `OutcomeSink` for finished games.
//!
//! The run is strictly sequential. The only wait is reading the next line,
//! plus an optional replay pause after each redisplay.

use std::io::BufRead;

use tracing::{info, warn};

use crate::capture::{Demultiplexer, Message, StreamKind};
use crate::cards::CardCatalog;
use crate::config::TrackerConfig;
use crate::core::TrackError;
use crate::display::Snapshot;
use crate::outcome::OutcomeSink;
use crate::protocol::{decode_message, Command};
use crate::tracker::Tracker;

/// Hooks called while the pipeline runs. Every hook defaults to a no-op.
pub trait CaptureObserver {
    /// Every input line exactly as read, terminator included.
    fn raw_line(&mut self, _line: &str) -> Result<(), TrackError> {
        Ok(())
    }

    /// Every decoded command of a forwarded message, before dispatch.
    fn command(&mut self, _stream: Option<StreamKind>, _cmd: &Command<'_>) -> Result<(), TrackError> {
        Ok(())
    }

    /// Displayable state changed.
    fn redisplay(&mut self, _snapshot: &Snapshot) -> Result<(), TrackError> {
        Ok(())
    }
}

/// Observer that ignores everything.
impl CaptureObserver for () {}

/// Counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    /// Messages forwarded to the tracker.
    pub messages: usize,
    pub commands: usize,
    /// Outcome records written.
    pub games: usize,
    pub redisplays: usize,
}

/// Capture-to-tracker driver owning the demultiplexer, tracker and both seams.
pub struct Pipeline<C: CardCatalog, O: CaptureObserver, S: OutcomeSink> {
    config: TrackerConfig,
    demux: Demultiplexer,
    tracker: Tracker<C>,
    observer: O,
    sink: S,
    summary: RunSummary,
}

impl<C: CardCatalog, O: CaptureObserver, S: OutcomeSink> Pipeline<C, O, S> {
    /// Create a pipeline whose demultiplexer follows `config`.
    pub fn new(config: TrackerConfig, tracker: Tracker<C>, observer: O, sink: S) -> Self {
        Self {
            demux: Demultiplexer::new(&config),
            config,
            tracker,
            observer,
            sink,
            summary: RunSummary::default(),
        }
    }

    /// The tracker being driven.
    #[must_use]
    pub fn tracker(&self) -> &Tracker<C> {
        &self.tracker
    }

    /// The observer receiving hooks.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The sink receiving outcome records.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Split into the tracker, observer and sink.
    pub fn into_parts(self) -> (Tracker<C>, O, S) {
        (self.tracker, self.observer, self.sink)
    }

    /// Read lines until end of input or the first fatal error.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<RunSummary, TrackError> {
        let result = self.drive(reader);
        match &result {
            Ok(summary) => info!(
                lines = summary.lines,
                commands = summary.commands,
                games = summary.games,
                "capture finished"
            ),
            Err(err) => warn!(error = %err, kind = ?err.kind(), line = self.summary.lines, "tracking stopped"),
        }
        result
    }

    fn drive<R: BufRead>(&mut self, mut reader: R) -> Result<RunSummary, TrackError> {
        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            self.feed_line(&line)?;
            line.clear();
        }
        if let Some(message) = self.demux.finish()? {
            self.handle_message(&message)?;
        }
        Ok(self.summary)
    }

    /// Process one raw capture line. A trailing line terminator is allowed
    /// and reaches the observer untouched.
    pub fn feed_line(&mut self, line: &str) -> Result<(), TrackError> {
        self.summary.lines += 1;
        self.observer.raw_line(line)?;
        if let Some(message) = self.demux.feed_line(line)? {
            self.handle_message(&message)?;
        }
        Ok(())
    }

    fn handle_message(&mut self, message: &Message) -> Result<(), TrackError> {
        self.summary.messages += 1;

        for cmd in decode_message(&message.text) {
            self.summary.commands += 1;
            self.observer.command(message.stream, &cmd)?;
            if let Some(record) = self.tracker.apply(&cmd)? {
                self.sink.record(&record)?;
                self.summary.games += 1;
            }
        }

        if self.tracker.take_redisplay() {
            if let Some(snapshot) = self.tracker.snapshot() {
                self.observer.redisplay(&snapshot)?;
                self.summary.redisplays += 1;
                if let Some(delay) = self.config.replay_delay {
                    std::thread::sleep(delay);
                }
            }
        }
        Ok(())
    }
}
