// astrodash-api: Async Rust client for the astrodash NASA proxy

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::ProxyClient;
pub use error::Error;
pub use models::{RawApod, RawCamera, RawManifest, RawPhoto, RawRover, RawUpstreamError};
pub use transport::TransportConfig;
