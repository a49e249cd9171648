/// Transient per-cell reconcile state (not persisted — computed at
/// runtime). Cells the session never wrote are not tracked at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSyncState {
    /// Last write reached the remote store
    Synced,
    /// Local value kept after a failed write
    Dirty,
}

impl Default for CellSyncState {
    fn default() -> Self {
        Self::Synced
    }
}

impl CellSyncState {
    /// Short label for status display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Synced => "Synced",
            Self::Dirty => "Modified",
        }
    }
}
