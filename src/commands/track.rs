//! Track command - follow a capture and render both decks
//!
//! Reads capture-tool output from a file or stdin. Every raw line is
//! mirrored to the net log, every decoded command to the command log, and
//! each finished game is appended to the day's outcome log.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use faeria_track::capture::StreamKind;
use faeria_track::cards::{load_bootstrap, CardRegistry};
use faeria_track::config::{StreamFilter, TrackerConfig, DEFAULT_REPLAY_DELAY};
use faeria_track::display::Snapshot;
use faeria_track::outcome::JsonLinesSink;
use faeria_track::pipeline::{CaptureObserver, Pipeline};
use faeria_track::protocol::Command;
use faeria_track::tracker::Tracker;
use faeria_track::TrackError;

/// Arguments for the track command
#[derive(Args)]
pub struct TrackArgs {
    /// Card catalog in `<id>.<field>;<value>` form
    #[arg(short, long)]
    pub cards: Option<PathBuf>,

    /// Recorded capture to replay (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Also forward world-server messages to the tracker
    #[arg(long)]
    pub all_inbound: bool,

    /// Directory receiving the daily outcome log
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Pause after each redisplay when replaying a file, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// Mirrors lines and commands to files and prints snapshots.
struct FileObserver {
    raw: BufWriter<File>,
    commands: BufWriter<File>,
}

impl FileObserver {
    fn create(config: &TrackerConfig) -> Result<Self> {
        let raw = File::create(&config.raw_log)
            .with_context(|| format!("Failed to create {}", config.raw_log.display()))?;
        let commands = File::create(&config.command_log)
            .with_context(|| format!("Failed to create {}", config.command_log.display()))?;
        Ok(Self {
            raw: BufWriter::new(raw),
            commands: BufWriter::new(commands),
        })
    }
}

impl CaptureObserver for FileObserver {
    fn raw_line(&mut self, line: &str) -> Result<(), TrackError> {
        self.raw.write_all(line.as_bytes())?;
        self.raw.flush()?;
        Ok(())
    }

    fn command(&mut self, stream: Option<StreamKind>, cmd: &Command<'_>) -> Result<(), TrackError> {
        let tag = stream.map_or('?', StreamKind::letter);
        writeln!(self.commands, "{tag}: {cmd}")?;
        self.commands.flush()?;
        Ok(())
    }

    fn redisplay(&mut self, snapshot: &Snapshot) -> Result<(), TrackError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{snapshot}")?;
        out.flush()?;
        Ok(())
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<CardRegistry> {
    let Some(path) = path else {
        warn!("no card catalog given, card names will be unknown");
        return Ok(CardRegistry::new());
    };
    let catalog = load_bootstrap(path)
        .with_context(|| format!("Failed to load cards from {}", path.display()))?;
    info!(cards = catalog.len(), path = %path.display(), "card catalog loaded");
    Ok(catalog)
}

/// Execute the track command
pub fn execute(args: TrackArgs) -> Result<()> {
    let catalog = load_catalog(args.cards.as_ref())?;

    let mut config = TrackerConfig::new().with_log_dir(&args.log_dir);
    if args.all_inbound {
        config = config.with_stream_filter(StreamFilter::AllInbound);
    }
    if args.input.is_some() {
        let delay = args
            .delay_ms
            .map_or(DEFAULT_REPLAY_DELAY, Duration::from_millis);
        config = config.with_replay_delay(delay);
    }

    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create {}", config.log_dir.display()))?;
    let day = chrono::Local::now().format("%Y%m%d").to_string();
    let outcome_path = config.outcome_log_for(&day);
    let outcome_log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&outcome_path)
        .with_context(|| format!("Failed to open {}", outcome_path.display()))?;

    let observer = FileObserver::create(&config)?;
    let tracker = Tracker::new(catalog);
    let mut pipeline = Pipeline::new(config, tracker, observer, JsonLinesSink::new(outcome_log));

    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open capture {}", path.display()))?;
            pipeline.run(BufReader::new(file))
        }
        None => pipeline.run(io::stdin().lock()),
    }?;

    println!(
        "Processed {} lines, {} commands, {} games recorded to {}",
        summary.lines,
        summary.commands,
        summary.games,
        outcome_path.display()
    );
    Ok(())
}
