//! Client-side data layer between `astrodash-api` and UI consumers (CLI / TUI).
//!
//! - **[`Store`]** — Immutable-snapshot state container. Every
//!   [`update`](Store::update) shallow-merges a [`StatePatch`] into a new
//!   [`Snapshot`] and synchronously notifies the single subscriber
//!   (the renderer). Updates from inside the render callback are rejected.
//!
//! - **[`FetchCache`]** — Keyed cache of remote resources with request
//!   coalescing: one in-flight load per key, resolved values served
//!   forever (until [`invalidate`](FetchCache::invalidate)), failures
//!   retried on the next request.
//!
//! - **[`RequestTracker`]** — Per-key sequence numbers. Results of a
//!   request that has since been superseded are discarded instead of
//!   overwriting fresher state.
//!
//! - **[`Dashboard`]** — Facade tying the proxy client, caches, tracker,
//!   and store together: `load_apod`, `select_rover`, `refresh`, ...
//!
//! - **[`view`]** — Pure view model derived from a snapshot, plus
//!   [`view::data_needs`] for discovering data to fetch after a render.

pub mod cache;
pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{EntryState, FetchCache, RequestTracker, Ticket};
pub use config::ClientConfig;
pub use dashboard::{Dashboard, LoadOutcome};
pub use error::{CoreError, FetchError};
pub use store::{DashboardState, Snapshot, StatePatch, Store};
pub use view::{DashboardView, DataNeed};

pub use model::{Apod, ApodMedia, Manifest, Photo, ResourceKey, Rover, User};
