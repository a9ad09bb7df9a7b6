//! Capture input: reassembly of capture-tool output into messages.

pub mod demux;

pub use demux::{Demultiplexer, Direction, Message, SegmentHeader, StreamKind};
