// ── Runtime client configuration ──
//
// Describes *how* to reach the proxy and what the dashboard starts with.
// Never touches disk: the CLI/TUI builds a `ClientConfig` (usually via
// `astrodash-config`) and hands it in.

use std::time::Duration;

use url::Url;

use crate::model::Rover;
use crate::store::DEFAULT_USER_NAME;

pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000";

/// Configuration for a single dashboard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Proxy root URL (e.g., `http://localhost:3000`).
    pub proxy_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Name shown in the greeting. Empty means anonymous.
    pub user_name: String,
    /// Rovers offered for selection, in display order.
    pub rovers: Vec<Rover>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: Url::parse(DEFAULT_PROXY_URL).expect("default proxy URL is valid"),
            timeout: Duration::from_secs(30),
            user_name: DEFAULT_USER_NAME.to_owned(),
            rovers: Rover::DEFAULT_ROSTER.to_vec(),
        }
    }
}
