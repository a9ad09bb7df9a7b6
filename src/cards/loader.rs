//! Bootstrap catalog loader.
//!
//! The bootstrap file carries one field per line:
//!
//! ```text
//! 12.name;Seafront Dealer
//! 12.text;Deal 1 damage to a creature.
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use super::definition::CardId;
use super::registry::CardRegistry;

/// Failure loading a bootstrap card catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Parse a bootstrap catalog from a reader.
pub fn parse_bootstrap(reader: impl BufRead) -> Result<CardRegistry, CatalogError> {
    let mut registry = CardRegistry::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let malformed = |reason: String| CatalogError::Malformed { line: number, reason };

        if line.trim().is_empty() {
            continue;
        }

        let (key, value) = line
            .split_once(';')
            .ok_or_else(|| malformed("missing ';' separator".to_string()))?;
        let (id, field) = key
            .split_once('.')
            .ok_or_else(|| malformed(format!("key {key:?} has no field")))?;
        let id: u32 = id
            .trim()
            .parse()
            .map_err(|_| malformed(format!("card id {id:?} is not a number")))?;
        let value = value.trim().to_string();

        let card = registry.entry(CardId::new(id));
        match field {
            "name" => card.name = value,
            "text" => card.text = Some(value),
            other => return Err(malformed(format!("unknown card field {other:?}"))),
        }
    }

    Ok(registry)
}

/// Load a bootstrap catalog from disk.
pub fn load_bootstrap(path: impl AsRef<Path>) -> Result<CardRegistry, CatalogError> {
    let file = File::open(path)?;
    parse_bootstrap(BufReader::new(file))
}
