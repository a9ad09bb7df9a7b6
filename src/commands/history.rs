//! History command - print the outcome log as a table

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use faeria_track::outcome::write_table;

/// Arguments for the history command
#[derive(Args)]
pub struct HistoryArgs {
    /// Outcome log to read (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Execute the history command
pub fn execute(args: HistoryArgs) -> Result<()> {
    let stdout = io::stdout().lock();
    let rows = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open outcome log {}", path.display()))?;
            write_table(BufReader::new(file), stdout)
        }
        None => write_table(io::stdin().lock(), stdout),
    }
    .context("Failed to read outcome log")?;

    tracing::debug!(rows, "history printed");
    Ok(())
}
