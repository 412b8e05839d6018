// ── Domain model ──
//
// Normalized records the rest of the system works with. Wire shapes from
// `astrodash-api` are converted into these at the loader boundary (see
// `convert`), so nothing downstream branches on missing fields.

mod apod;
mod manifest;
mod photo;
mod resource;
mod rover;

pub use apod::{Apod, ApodMedia};
pub use manifest::Manifest;
pub use photo::Photo;
pub use resource::ResourceKey;
pub use rover::Rover;

use serde::Serialize;

/// The person the dashboard greets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
