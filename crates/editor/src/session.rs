//! The editor session: explicit two-phase edits.
//!
//! Phase one applies the edit to the owned grid. Phase two writes the
//! touched range to the remote store. A failed phase two keeps the
//! local value, flags the affected cells dirty, and reports through
//! the sink; the session stays usable throughout.

use std::collections::BTreeMap;

use gridhub_grid::{CellAddress, Grid, Range, RowId};
use gridhub_remote::RemoteError;

use crate::notify::NotificationSink;
use crate::store::CellStore;
use crate::sync::CellSyncState;

/// Seed range fetched when a session opens ("A1:Z1000"). Wide enough
/// for the shapes the remote store realistically holds.
pub const DEFAULT_FETCH_RANGE: Range =
    Range::new(CellAddress::new(0, 0), CellAddress::new(999, 25));

/// What happened to an edit or push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Applied locally and confirmed remotely.
    Synced,
    /// Applied locally; the remote write failed and the cells involved
    /// are flagged dirty.
    Dirty,
    /// Nothing happened: unknown row id, an address outside the grid,
    /// or an empty grid with nothing to push. The grid is unchanged.
    Ignored,
}

/// One editing session over a fetched grid.
pub struct EditorSession<'a> {
    store: &'a dyn CellStore,
    sink: &'a dyn NotificationSink,
    grid: Grid,
    cell_sync: BTreeMap<CellAddress, CellSyncState>,
    last_error: Option<String>,
}

impl std::fmt::Debug for EditorSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `store` and `sink` are trait objects without a Debug bound.
        f.debug_struct("EditorSession")
            .field("grid", &self.grid)
            .field("cell_sync", &self.cell_sync)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl<'a> EditorSession<'a> {
    /// Fetch `seed_range` once and build the session's grid from it.
    ///
    /// A fetch failure is blocking: no session is created, the sink is
    /// told, and the error comes back to the caller.
    pub fn open(
        store: &'a dyn CellStore,
        sink: &'a dyn NotificationSink,
        seed_range: Range,
    ) -> Result<Self, RemoteError> {
        match store.fetch_range(seed_range) {
            Ok(values) => {
                let grid = Grid::from_values(values);
                log::debug!(
                    "Seeded grid {}x{} from {}",
                    grid.rows(),
                    grid.cols(),
                    seed_range
                );
                Ok(Self {
                    store,
                    sink,
                    grid,
                    cell_sync: BTreeMap::new(),
                    last_error: None,
                })
            }
            Err(e) => {
                log::warn!("Fetch of {} failed: {}", seed_range, e);
                sink.error("Failed to load spreadsheet.");
                Err(e)
            }
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The most recent remote failure seen by this session, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Edit one cell: apply locally, then write the 1×1 range.
    ///
    /// An unknown row id, or an address the row does not own, changes
    /// nothing and writes nothing. A failed write keeps the local
    /// value; the cell is flagged dirty, not rolled back.
    pub fn edit_cell(&mut self, row_id: RowId, addr: CellAddress, value: &str) -> EditOutcome {
        if !self.grid.apply_edit(row_id, addr, value) {
            return EditOutcome::Ignored;
        }

        match self
            .store
            .write_range(Range::single(addr), &[vec![value.to_string()]])
        {
            Ok(()) => {
                self.cell_sync.insert(addr, CellSyncState::Synced);
                self.sink.success("Cell updated successfully!");
                EditOutcome::Synced
            }
            Err(e) => {
                log::warn!("Write of {} failed, local value kept: {}", addr, e);
                self.cell_sync.insert(addr, CellSyncState::Dirty);
                self.last_error = Some(e.to_string());
                self.sink.error("Failed to update cell!");
                EditOutcome::Dirty
            }
        }
    }

    /// Append a row locally. Remote cells spring into existence on
    /// first write, so growth alone does not touch the store.
    pub fn add_row(&mut self) -> RowId {
        self.grid.add_row()
    }

    /// Append a column locally. Returns its name.
    pub fn add_column(&mut self) -> String {
        self.grid.add_column()
    }

    /// Grow the grid to at least the target shape (values preserved,
    /// never truncated), then push the whole grid remotely.
    pub fn resize(&mut self, target_rows: u32, target_cols: u32) -> EditOutcome {
        self.grid.resize(target_rows, target_cols);
        self.push_all()
    }

    /// Bulk-write the grid's full rectangle to the remote store.
    ///
    /// On success every tracked cell inside the grid is synced; on
    /// failure every cell of the pushed range is flagged dirty.
    pub fn push_all(&mut self) -> EditOutcome {
        let range = match self.grid.range() {
            Some(r) => r,
            None => return EditOutcome::Ignored,
        };

        match self.store.write_range(range, &self.grid.to_values()) {
            Ok(()) => {
                for state in self.cell_sync.values_mut() {
                    *state = CellSyncState::Synced;
                }
                self.sink.success("Grid updated successfully!");
                EditOutcome::Synced
            }
            Err(e) => {
                log::warn!("Bulk write of {} failed, local values kept: {}", range, e);
                for r in 0..self.grid.rows() {
                    for c in 0..self.grid.cols() {
                        self.cell_sync
                            .insert(CellAddress::new(r, c), CellSyncState::Dirty);
                    }
                }
                self.last_error = Some(e.to_string());
                self.sink.error("Failed to update grid!");
                EditOutcome::Dirty
            }
        }
    }

    /// Reconcile state of one cell. Cells never written are in sync
    /// by definition.
    pub fn sync_state(&self, addr: CellAddress) -> CellSyncState {
        self.cell_sync
            .get(&addr)
            .copied()
            .unwrap_or(CellSyncState::Synced)
    }

    /// Addresses whose last write failed, in address order.
    pub fn dirty_cells(&self) -> Vec<CellAddress> {
        self.cell_sync
            .iter()
            .filter(|(_, s)| **s == CellSyncState::Dirty)
            .map(|(a, _)| *a)
            .collect()
    }
}
