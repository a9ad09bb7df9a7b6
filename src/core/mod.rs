//! Core types shared by every layer: seats and errors.

pub mod error;
pub mod seat;

pub use error::{CaptureLine, ErrorKind, Reference, TrackError};
pub use seat::{Seat, SeatMap};
