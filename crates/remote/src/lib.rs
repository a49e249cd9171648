//! Remote collaborators: the spreadsheet registry and the values API.
//!
//! Blocking reqwest clients (no Tokio runtime required). This crate is
//! the single source of truth for both wire contracts: registry records
//! with their links and cell resources, and rectangular value ranges.
//!
//! No retries. No rollback. One request per operation.

mod error;
mod registry;
mod values;

pub use error::RemoteError;
pub use registry::{CellRecord, LinkRecord, RegistryClient, SheetRecord};
pub use values::{ValueRange, ValuesClient};
