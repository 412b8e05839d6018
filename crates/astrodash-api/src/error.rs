use thiserror::Error;

/// Top-level error type for the `astrodash-api` crate.
///
/// Covers every failure mode of a proxy round-trip: transport, HTTP status,
/// upstream NASA error payloads, and body decoding. `astrodash-core` folds
/// these into its three-way `FetchError` taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The configured base URL cannot carry path segments.
    #[error("Invalid proxy base URL: {0}")]
    InvalidBaseUrl(String),

    /// Building the underlying `reqwest::Client` failed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Proxy responses ─────────────────────────────────────────────
    /// Non-2xx response from the proxy.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The proxy answered 200 but relayed an error object from NASA.
    #[error("Upstream API error{}: {message}", code_suffix(.code))]
    Upstream { code: Option<u16>, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

#[allow(clippy::ref_option)]
fn code_suffix(code: &Option<u16>) -> String {
    code.map(|c| format!(" ({c})")).unwrap_or_default()
}

impl Error {
    /// HTTP status code carried by this error, if any. Coded upstream
    /// payloads count.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Upstream { code, .. } => *code,
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_covers_responses_and_coded_payloads() {
        let status = Error::Status {
            status: 503,
            body: String::new(),
        };
        assert_eq!(status.status_code(), Some(503));

        let coded = Error::Upstream {
            code: Some(429),
            message: "OVER_RATE_LIMIT".into(),
        };
        assert_eq!(coded.status_code(), Some(429));

        let uncoded = Error::Upstream {
            code: None,
            message: "API_KEY_INVALID".into(),
        };
        assert_eq!(uncoded.status_code(), None);
        assert_eq!(Error::Timeout { timeout_secs: 5 }.status_code(), None);
    }

    #[test]
    fn upstream_display_includes_code_when_present() {
        let with_code = Error::Upstream {
            code: Some(400),
            message: "bad date".into(),
        };
        assert_eq!(with_code.to_string(), "Upstream API error (400): bad date");

        let without = Error::Upstream {
            code: None,
            message: "API_KEY_INVALID".into(),
        };
        assert_eq!(without.to_string(), "Upstream API error: API_KEY_INVALID");
    }
}
