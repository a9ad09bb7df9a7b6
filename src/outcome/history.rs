//! One-line summaries of logged outcomes.

use std::io::{BufRead, Write};

use super::record::OutcomeRecord;
use crate::core::TrackError;
use crate::model::Lands;

/// Rows between repeated headers.
pub const HEADER_EVERY: usize = 10;

fn mode_letter(mode: &str) -> &'static str {
    match mode {
        "COMPETITIVE" => "R",
        "CASUAL" => "C",
        _ => "?",
    }
}

fn lands_or_unknown(lands: Option<&Lands>) -> String {
    lands.map_or_else(|| "?".to_string(), Lands::pretty)
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// One outcome record condensed to a table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRow {
    pub stamp: String,
    pub victory: String,
    pub first: String,
    pub mode: String,
    pub opponent_eco: String,
    pub my_eco: String,
    pub opponent_lands: String,
    pub my_lands: String,
    pub deck_name: String,
    pub opponent_rank: String,
    pub opponent_name: String,
}

impl HistoryRow {
    /// Column titles, formatted like a row.
    #[must_use]
    pub fn header() -> Self {
        Self {
            stamp: "** Timestamp".into(),
            victory: "W/L".into(),
            first: "1st".into(),
            mode: "mode".into(),
            opponent_eco: "oeco".into(),
            my_eco: "meco".into(),
            opponent_lands: "olands".into(),
            my_lands: "mlands".into(),
            deck_name: "deckname".into(),
            opponent_rank: "orank".into(),
            opponent_name: "oname".into(),
        }
    }

    /// Condense a record into a row.
    #[must_use]
    pub fn from_record(record: &OutcomeRecord) -> Self {
        let opponent_rank = if record.opponent.grank != "0" {
            format!("#{}", record.opponent.grank)
        } else {
            format!("R{}", record.opponent.rank)
        };

        Self {
            stamp: clip(&record.stamp, 13),
            victory: if record.victory { "W" } else { "L" }.into(),
            first: if record.first { "F" } else { "S" }.into(),
            mode: format!(
                "{}v{}",
                mode_letter(&record.me.mode),
                mode_letter(&record.opponent.mode)
            ),
            opponent_eco: record.opponent.eco.to_string(),
            my_eco: record.me.eco.to_string(),
            opponent_lands: lands_or_unknown(record.opponent.lands.as_ref()),
            my_lands: lands_or_unknown(record.me.lands.as_ref()),
            deck_name: clip(&record.me.deckname, 15),
            opponent_rank,
            opponent_name: clip(&record.opponent.name, 20),
        }
    }
}

impl std::fmt::Display for HistoryRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<13}  {:<3}  {:<4}  {:>4} {:>5}  {:>5}  {:<14}  {:<14}  {:<15}  {:<5}  {:<20}",
            self.stamp,
            self.victory,
            self.first,
            self.mode,
            self.opponent_eco,
            self.my_eco,
            self.opponent_lands,
            self.my_lands,
            self.deck_name,
            self.opponent_rank,
            self.opponent_name,
        )
    }
}

/// Print one row per outcome line, repeating the header every
/// `HEADER_EVERY` rows. Blank lines are skipped. Returns the row count.
pub fn write_table(reader: impl BufRead, mut out: impl Write) -> Result<usize, TrackError> {
    let mut rows = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if rows % HEADER_EVERY == 0 {
            if rows != 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}", HistoryRow::header())?;
        }
        let record: OutcomeRecord = serde_json::from_str(&line)?;
        writeln!(out, "{}", HistoryRow::from_record(&record))?;
        rows += 1;
    }
    Ok(rows)
}
