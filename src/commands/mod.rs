//! Subcommands of the `faeria-track` binary.

pub mod history;
pub mod track;
