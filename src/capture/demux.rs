//! Capture-tool demultiplexer.
//!
//! The capture tool prints one header line per TCP segment followed by
//! hex-dump lines and a blank line:
//!
//! ```text
//! 1508000000T010.000.000.001.02202-192.168.001.002.51000:
//! 0000: 317c 2473 7461 7274 4761 6d65 0a         1|$startGame.
//!
//! ```
//!
//! Segments are reassembled per direction. A direction's buffer becomes a
//! complete message when a segment ends on a newline byte.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::config::{StreamFilter, TrackerConfig};
use crate::core::{CaptureLine, TrackError};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)T(\d+\.\d+\.\d+\.\d+)\.(\d+)-(\d+\.\d+\.\d+\.\d+)\.(\d+):\s*$")
        .expect("header pattern is valid")
});

static DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]+: ((?:[0-9a-f]{2,4} )+).*$").expect("data pattern is valid")
});

/// Segment direction relative to the game servers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sent by a game server.
    Inbound,
    /// Sent by the client.
    Outbound,
}

impl Direction {
    const fn slot(self) -> usize {
        match self {
            Direction::Inbound => 0,
            Direction::Outbound => 1,
        }
    }
}

/// Which server an inbound segment came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamKind {
    World,
    Game,
}

impl StreamKind {
    /// One-letter tag used in the command log.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            StreamKind::World => 'W',
            StreamKind::Game => 'G',
        }
    }
}

/// A parsed header line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentHeader {
    pub stamp: String,
    pub src_ip: String,
    pub src_port: u16,
    pub dst_ip: String,
    pub dst_port: u16,
}

/// A reassembled application message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub direction: Direction,
    /// `None` for outbound traffic.
    pub stream: Option<StreamKind>,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    AwaitHeader,
    InSegment {
        direction: Direction,
        stream: Option<StreamKind>,
    },
}

/// Line-driven reassembly of capture output.
#[derive(Debug)]
pub struct Demultiplexer {
    world_port: u16,
    game_port: u16,
    filter: StreamFilter,
    state: State,
    buffers: [Vec<u8>; 2],
}

impl Demultiplexer {
    /// Create a demultiplexer for the configured ports and filter.
    #[must_use]
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            world_port: config.world_port,
            game_port: config.game_port,
            filter: config.stream_filter,
            state: State::AwaitHeader,
            buffers: [Vec::new(), Vec::new()],
        }
    }

    /// Feed one raw line.
    ///
    /// Returns a message when this line closes a segment that completes
    /// one and the message passes the stream filter. Messages the filter
    /// rejects are still consumed.
    pub fn feed_line(&mut self, line: &str) -> Result<Option<Message>, TrackError> {
        let line = line.trim();
        match self.state {
            State::AwaitHeader => {
                let header = parse_header(line)?;
                let (direction, stream) = self.classify(&header);
                trace!(?direction, ?stream, src_port = header.src_port, "segment");
                self.state = State::InSegment { direction, stream };
                Ok(None)
            }
            State::InSegment { .. } if line.is_empty() => self.end_segment(),
            State::InSegment { direction, .. } => {
                let bytes = parse_data(line)?;
                self.buffers[direction.slot()].extend_from_slice(&bytes);
                Ok(None)
            }
        }
    }

    /// Close a segment left open at end of input.
    pub fn finish(&mut self) -> Result<Option<Message>, TrackError> {
        match self.state {
            State::AwaitHeader => Ok(None),
            State::InSegment { .. } => self.end_segment(),
        }
    }

    /// Classify a segment by its source port.
    #[must_use]
    pub fn classify(&self, header: &SegmentHeader) -> (Direction, Option<StreamKind>) {
        if header.src_port == self.world_port {
            (Direction::Inbound, Some(StreamKind::World))
        } else if header.src_port == self.game_port {
            (Direction::Inbound, Some(StreamKind::Game))
        } else {
            (Direction::Outbound, None)
        }
    }

    fn end_segment(&mut self) -> Result<Option<Message>, TrackError> {
        let State::InSegment { direction, stream } = self.state else {
            return Ok(None);
        };
        self.state = State::AwaitHeader;

        let buffer = &mut self.buffers[direction.slot()];
        if buffer.last() != Some(&b'\n') {
            return Ok(None);
        }
        let bytes = std::mem::take(buffer);

        if !self.forwards(direction, stream) {
            return Ok(None);
        }

        let text = String::from_utf8(bytes).map_err(|err| TrackError::MalformedCapture {
            line_kind: CaptureLine::Data,
            line: format!("payload is not text: {err}"),
        })?;
        Ok(Some(Message {
            direction,
            stream,
            text,
        }))
    }

    fn forwards(&self, direction: Direction, stream: Option<StreamKind>) -> bool {
        match (direction, stream, self.filter) {
            (Direction::Outbound, _, _) => false,
            (Direction::Inbound, Some(StreamKind::Game), _) => true,
            (Direction::Inbound, _, StreamFilter::AllInbound) => true,
            (Direction::Inbound, _, StreamFilter::GameOnly) => false,
        }
    }
}

/// Parse a segment header line.
pub fn parse_header(line: &str) -> Result<SegmentHeader, TrackError> {
    let malformed = || TrackError::MalformedCapture {
        line_kind: CaptureLine::Header,
        line: line.to_string(),
    };

    let caps = HEADER.captures(line).ok_or_else(malformed)?;
    let port = |i: usize| caps[i].parse::<u16>().map_err(|_| malformed());

    Ok(SegmentHeader {
        stamp: caps[1].to_string(),
        src_ip: caps[2].to_string(),
        src_port: port(3)?,
        dst_ip: caps[4].to_string(),
        dst_port: port(5)?,
    })
}

/// Decode the hex bytes of one data line.
pub fn parse_data(line: &str) -> Result<Vec<u8>, TrackError> {
    let malformed = || TrackError::MalformedCapture {
        line_kind: CaptureLine::Data,
        line: line.to_string(),
    };

    let caps = DATA.captures(line).ok_or_else(malformed)?;
    let digits: String = caps[1].chars().filter(|c| *c != ' ').collect();
    hex::decode(digits).map_err(|_| malformed())
}
