//! Seat identification and per-seat storage.
//!
//! ## Seat
//!
//! A game always has exactly two competitors, seated at 0 and 1.
//! The wire protocol also uses `-1` for "no seat" (cards materializing from
//! outside play), which is why raw seat fields are parsed as `i32` and only
//! converted to `Seat` when they name a real player.
//!
//! ## SeatMap
//!
//! Fixed two-slot storage indexed by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier, 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(u8);

impl Seat {
    /// The seat that opens every game.
    pub const FIRST: Seat = Seat(0);
    /// The seat that moves second.
    pub const SECOND: Seat = Seat(1);

    /// Convert a wire seat number. Returns `None` for anything but 0 or 1.
    #[must_use]
    pub fn from_wire(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Seat(0)),
            1 => Some(Seat(1)),
            _ => None,
        }
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat as it appears on the wire.
    #[must_use]
    pub const fn wire(self) -> i32 {
        self.0 as i32
    }

    /// The other competitor's seat.
    #[must_use]
    pub const fn other(self) -> Self {
        Seat(1 - self.0)
    }

    /// Both seats in order.
    #[must_use]
    pub fn both() -> impl Iterator<Item = Seat> {
        [Seat(0), Seat(1)].into_iter()
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage.
///
/// ```
/// use faeria_track::core::{Seat, SeatMap};
///
/// let mut health = SeatMap::new(|_| 20);
/// health[Seat::SECOND] = 15;
/// assert_eq!(health[Seat::FIRST], 20);
/// assert_eq!(health[Seat::SECOND], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: [T; 2],
}

impl<T> SeatMap<T> {
    /// Create with values from a factory function.
    pub fn new(mut factory: impl FnMut(Seat) -> T) -> Self {
        Self {
            data: [factory(Seat(0)), factory(Seat(1))],
        }
    }

    /// Get the value for a seat.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to the value for a seat.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        Seat::both().zip(self.data.iter())
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}
