//! Editing session over a remote cell store.
//!
//! The session owns an explicit [`Grid`](gridhub_grid::Grid) seeded
//! from one fetch, applies edits optimistically, and reconciles each
//! edit against the remote store. A failed reconcile keeps the local
//! value and flags the cell dirty; nothing is rolled back and nothing
//! is retried. Outcomes are surfaced through a [`NotificationSink`].

mod notify;
mod session;
mod store;
mod sync;

pub use notify::{NotificationSink, NullSink};
pub use session::{EditOutcome, EditorSession, DEFAULT_FETCH_RANGE};
pub use store::{CellStore, RemoteSheet};
pub use sync::CellSyncState;
