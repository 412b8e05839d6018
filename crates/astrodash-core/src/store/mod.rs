// ── Snapshot store ──
//
// Immutable application state with shallow-merge updates and a single
// synchronous render subscriber.

mod data_store;
mod state;

pub use data_store::{RenderFn, Store};
pub use state::{DEFAULT_USER_NAME, DashboardState, Snapshot, StatePatch};
