//! The remote cell store seam.

use gridhub_grid::Range;
use gridhub_remote::{RemoteError, ValuesClient};

/// What the session needs from a remote cell store: one fetch to seed
/// the grid, writes to persist a single cell or the whole grid.
pub trait CellStore {
    /// Read the values inside `range`, row-major. Trailing blanks may
    /// be omitted.
    fn fetch_range(&self, range: Range) -> Result<Vec<Vec<String>>, RemoteError>;

    /// Write `values` over `range`.
    fn write_range(&self, range: Range, values: &[Vec<String>]) -> Result<(), RemoteError>;
}

/// The values API bound to one external sheet.
pub struct RemoteSheet {
    client: ValuesClient,
    sheet_id: String,
}

impl RemoteSheet {
    pub fn new(client: ValuesClient, sheet_id: impl Into<String>) -> Self {
        Self { client, sheet_id: sheet_id.into() }
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }
}

impl CellStore for RemoteSheet {
    fn fetch_range(&self, range: Range) -> Result<Vec<Vec<String>>, RemoteError> {
        Ok(self.client.get_range(&self.sheet_id, range)?.values)
    }

    fn write_range(&self, range: Range, values: &[Vec<String>]) -> Result<(), RemoteError> {
        self.client.update_range(&self.sheet_id, range, values)
    }
}
