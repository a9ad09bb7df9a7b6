//! Command grammar: message splitting, field access, and command tags.

pub mod command;
pub mod tag;

pub use command::{decode_message, ArgMap, Args, Command};
pub use tag::CommandTag;
