//! faeria-track - passive deck tracker for captured Faeria traffic
//!
//! # Commands
//!
//! - `faeria-track track` - Follow a capture and show both decks as the game runs
//! - `faeria-track history` - Summarize logged game outcomes
//!
//! # Usage
//!
//! ```bash
//! # Live: pipe the capture tool straight in
//! sudo tcpflow -E tcpdemux -p -c -D -Ft -Fc -S enable_report=NO \
//!     tcp src portrange 2201-2202 | faeria-track track --cards cards.txt
//!
//! # Replay a recorded capture with the default pacing
//! faeria-track track --cards cards.txt --input faeriatrack_net.log
//!
//! # Outcome table for one day
//! faeria-track history --input logs/faeriatrack_gamelog_20261018.log
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Passive deck tracker for captured Faeria traffic
#[derive(Parser)]
#[command(name = "faeria-track")]
#[command(about = "Passive deck tracker for captured Faeria traffic")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow a capture and show both decks as the game runs
    Track(commands::track::TrackArgs),

    /// Summarize logged game outcomes
    History(commands::history::HistoryArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track(args) => commands::track::execute(args),
        Commands::History(args) => commands::history::execute(args),
    }
}
