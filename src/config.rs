//! Tracker configuration.
//!
//! `TrackerConfig` carries everything the pipeline needs that is not part of
//! the protocol itself: which ports the game servers listen on, which
//! streams are forwarded to the tracker, replay pacing, and the file names
//! the binary uses for its sinks.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default listener port of the world (lobby/account) server.
pub const DEFAULT_WORLD_PORT: u16 = 2201;

/// Default listener port of the game server.
pub const DEFAULT_GAME_PORT: u16 = 2202;

/// Default pause after each redisplay when replaying a recorded capture.
pub const DEFAULT_REPLAY_DELAY: Duration = Duration::from_millis(300);

/// Which completed inbound messages reach the tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamFilter {
    /// Only messages from the game server port.
    #[default]
    GameOnly,
    /// Messages from both the world and game server ports.
    AllInbound,
}

/// Tracker configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Source port of the world (lobby) server.
    pub world_port: u16,

    /// Source port of the game server.
    pub game_port: u16,

    pub stream_filter: StreamFilter,

    /// Pause after each redisplay. `None` for live captures.
    pub replay_delay: Option<Duration>,

    /// Directory receiving the daily outcome log.
    pub log_dir: PathBuf,

    /// Mirror of every raw capture line.
    pub raw_log: PathBuf,

    /// Mirror of every decoded command, prefixed with its stream.
    pub command_log: PathBuf,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            world_port: DEFAULT_WORLD_PORT,
            game_port: DEFAULT_GAME_PORT,
            stream_filter: StreamFilter::default(),
            replay_delay: None,
            log_dir: PathBuf::from("logs"),
            raw_log: PathBuf::from("faeriatrack_net.log"),
            command_log: PathBuf::from("faeriatrack_commands.log"),
        }
    }
}

impl TrackerConfig {
    /// Configuration with default ports, game-only filtering and no pacing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the listener ports.
    #[must_use]
    pub fn with_ports(mut self, world: u16, game: u16) -> Self {
        self.world_port = world;
        self.game_port = game;
        self
    }

    /// Set which inbound streams reach the tracker.
    #[must_use]
    pub fn with_stream_filter(mut self, filter: StreamFilter) -> Self {
        self.stream_filter = filter;
        self
    }

    /// Pause after each redisplay.
    #[must_use]
    pub fn with_replay_delay(mut self, delay: Duration) -> Self {
        self.replay_delay = Some(delay);
        self
    }

    /// Set the directory for the raw, command and outcome logs.
    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Outcome log path for the given day stamp (`YYYYMMDD`).
    #[must_use]
    pub fn outcome_log_for(&self, day: &str) -> PathBuf {
        self.log_dir.join(format!("faeriatrack_gamelog_{day}.log"))
    }
}
