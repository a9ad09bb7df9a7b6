//! Card catalog: definitions, lookup, and the bootstrap loader.
//!
//! ## Key Types
//!
//! - `CardId`: catalog identifier
//! - `Card`: immutable name/text entry
//! - `CardCatalog`: the lookup seam the tracker depends on
//! - `CardRegistry`: in-memory catalog

pub mod definition;
pub mod loader;
pub mod registry;

pub use definition::{Card, CardId};
pub use loader::{load_bootstrap, parse_bootstrap, CatalogError};
pub use registry::{CardCatalog, CardRegistry};
