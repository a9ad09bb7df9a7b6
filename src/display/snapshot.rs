//! Read-only display view of the active game.

use crate::core::{Seat, SeatMap};
use crate::model::{DeckCard, Game, Player};

/// Copies of a card the opponent can hold at most, for draw estimates.
const MAX_COPIES: u32 = 3;

/// Chance of drawing a card next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawChance {
    /// Truncated percentage below 100.
    Percent(u32),
    /// 100% or more.
    Certain,
    /// More copies seen than a deck may hold.
    Unknown,
}

impl DrawChance {
    fn from_ratio(amount: u32, deck_count: i32) -> Self {
        if deck_count < 1 {
            return DrawChance::Percent(0);
        }
        let percent = u64::from(amount) * 100 / u64::from(deck_count.unsigned_abs());
        match u32::try_from(percent) {
            Ok(p) if p < 100 => DrawChance::Percent(p),
            _ => DrawChance::Certain,
        }
    }

    /// Local deck: remaining copies over the reported deck size.
    #[must_use]
    pub fn local(quantity: u32, deck_count: i32) -> Self {
        Self::from_ratio(quantity, deck_count)
    }

    /// Opponent deck: copies not yet seen over the reported deck size.
    ///
    /// ```
    /// use faeria_track::display::DrawChance;
    ///
    /// assert_eq!(DrawChance::opponent(1, 20), DrawChance::Percent(10));
    /// assert_eq!(DrawChance::opponent(4, 20), DrawChance::Unknown);
    /// assert_eq!(DrawChance::opponent(0, 2), DrawChance::Certain);
    /// ```
    #[must_use]
    pub fn opponent(quantity: u32, deck_count: i32) -> Self {
        if quantity > MAX_COPIES {
            return DrawChance::Unknown;
        }
        Self::from_ratio(MAX_COPIES - quantity, deck_count)
    }
}

impl std::fmt::Display for DrawChance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawChance::Percent(p) => write!(f, "{p:>2}"),
            DrawChance::Certain => write!(f, "NX"),
            DrawChance::Unknown => write!(f, "??"),
        }
    }
}

/// One tracked card line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckRow {
    /// Copies in deck plus copies in hand.
    pub total: u32,
    pub quantity: u32,
    pub hquantity: u32,
    pub generated: bool,
    pub name: String,
    pub chance: DrawChance,
}

impl DeckRow {
    fn new(dc: &DeckCard, chance: DrawChance) -> Self {
        Self {
            total: dc.total(),
            quantity: dc.quantity(),
            hquantity: dc.hquantity(),
            generated: dc.generated,
            name: dc.card.short_name(),
            chance,
        }
    }
}

/// Per-seat summary and deck rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatView {
    pub name: String,
    pub is_local: bool,
    pub is_current: bool,
    pub health: i32,
    pub faeria: i32,
    pub eco: i32,
    pub deck_count: i32,
    pub hand_count: i32,
    /// Short land form such as `R2B1`.
    pub lands: String,
    pub rows: Vec<DeckRow>,
    /// Deck cards not accounted for by any row.
    pub unknown: i32,
}

impl SeatView {
    fn new(player: &Player, is_local: bool, is_current: bool) -> Self {
        let rows = player
            .deck
            .cards()
            .map(|dc| {
                let chance = if is_local {
                    DrawChance::local(dc.quantity(), player.deck_count)
                } else {
                    DrawChance::opponent(dc.quantity(), player.deck_count)
                };
                DeckRow::new(dc, chance)
            })
            .collect();

        Self {
            name: player.name.clone(),
            is_local,
            is_current,
            health: player.health,
            faeria: player.faeria,
            eco: player.harvested,
            deck_count: player.deck_count,
            hand_count: player.hand_count,
            lands: player.lands.pretty(),
            rows,
            unknown: player.unknown_cards(is_local),
        }
    }
}

/// Everything a renderer needs after a redisplay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub turn: u32,
    pub current_name: String,
    /// Mode letters, local first.
    pub modes: (String, String),
    pub seats: SeatMap<SeatView>,
}

fn mode_letter(mode: &str) -> String {
    match mode {
        "COMPETITIVE" => "R".to_string(),
        "CASUAL" => "C".to_string(),
        other => other.to_string(),
    }
}

impl Snapshot {
    /// View of `game`. `None` until seats are assigned and a player holds
    /// the turn.
    #[must_use]
    pub fn of(game: &Game) -> Option<Self> {
        let seating = game.seating.as_ref()?;
        let current = game.current_seat?;

        Some(Self {
            turn: game.turn,
            current_name: seating.players[current].name.clone(),
            modes: (mode_letter(&game.self_mode), mode_letter(&game.opponent_mode)),
            seats: SeatMap::new(|seat: Seat| {
                SeatView::new(&seating.players[seat], seat == seating.local, seat == current)
            }),
        })
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "#{} - Playing({}v{}): {}",
            self.turn, self.modes.0, self.modes.1, self.current_name
        )?;
        for (_, view) in self.seats.iter() {
            let marker = if view.is_current { "*" } else { " " };
            writeln!(f, "{marker}{}", view.name)?;
            writeln!(
                f,
                "  HP:{:<2} / MP:{:<2} / Eco:{:<3} D:{:<2} / H:{:<2} / L:{}",
                view.health, view.faeria, view.eco, view.deck_count, view.hand_count, view.lands
            )?;
            for row in &view.rows {
                let flag = if row.generated { "+" } else { "" };
                writeln!(f, "  {:>2}x{}% {}{flag}", row.total, row.chance, row.name)?;
            }
            if view.unknown > 0 {
                writeln!(f, "  {:>2}:     <Unknown>", view.unknown)?;
            }
        }
        Ok(())
    }
}
