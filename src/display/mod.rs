//! Display projection.
//!
//! Renderers never see the tracker's session. After a redisplay they get a
//! `Snapshot`: plain values computed from the active game, including the
//! per-row draw chances.

pub mod snapshot;

pub use snapshot::{DeckRow, DrawChance, SeatView, Snapshot};
