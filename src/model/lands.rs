//! Land counters per player.

use std::ops::Index;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the five land colors. The wire calls neutral land `human`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LandColor {
    Neutral,
    Red,
    Blue,
    Green,
    Yellow,
}

impl LandColor {
    /// Every color in display order.
    pub const ALL: [LandColor; 5] = [
        LandColor::Neutral,
        LandColor::Red,
        LandColor::Blue,
        LandColor::Green,
        LandColor::Yellow,
    ];

    /// Map a wire color name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "human" => Some(LandColor::Neutral),
            "red" => Some(LandColor::Red),
            "blue" => Some(LandColor::Blue),
            "green" => Some(LandColor::Green),
            "yellow" => Some(LandColor::Yellow),
            _ => None,
        }
    }

    /// Key used in outcome records.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            LandColor::Neutral => "neutral",
            LandColor::Red => "red",
            LandColor::Blue => "blue",
            LandColor::Green => "green",
            LandColor::Yellow => "yellow",
        }
    }

    /// Single-letter code used in the compact form.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            LandColor::Neutral => 'N',
            LandColor::Red => 'R',
            LandColor::Blue => 'B',
            LandColor::Green => 'G',
            LandColor::Yellow => 'Y',
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Land counts, only ever incremented during a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lands {
    counts: [u32; 5],
}

impl Lands {
    /// No lands.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one land of `color`.
    pub fn gain(&mut self, color: LandColor) {
        let count = &mut self.counts[color.slot()];
        *count = count.saturating_add(1);
    }

    /// Compact form such as `R2B1`, skipping colors with no land.
    #[must_use]
    pub fn pretty(&self) -> String {
        LandColor::ALL
            .iter()
            .filter(|&&color| self[color] > 0)
            .map(|&color| format!("{}{}", color.letter(), self[color]))
            .collect()
    }
}

impl Index<LandColor> for Lands {
    type Output = u32;

    fn index(&self, color: LandColor) -> &u32 {
        &self.counts[color.slot()]
    }
}

impl Serialize for Lands {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LandColor::ALL.len()))?;
        for color in LandColor::ALL {
            map.serialize_entry(color.key(), &self[color])?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Lands {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Keyed {
            #[serde(default)]
            neutral: u32,
            #[serde(default)]
            red: u32,
            #[serde(default)]
            blue: u32,
            #[serde(default)]
            green: u32,
            #[serde(default)]
            yellow: u32,
        }

        let k = Keyed::deserialize(deserializer)?;
        Ok(Lands {
            counts: [k.neutral, k.red, k.blue, k.green, k.yellow],
        })
    }
}
