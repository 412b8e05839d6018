// ── Core error types ──
//
// `FetchError` is the three-way taxonomy every loader resolves to. It is
// `Clone` so coalesced callers of one in-flight request can all receive
// the same failure. `CoreError` wraps it with the store and lookup errors
// consumers can hit.

use thiserror::Error;

/// Failure of a single remote load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure: connection refused, DNS, timeout, ...
    #[error("Network error: {message}")]
    Network { message: String },

    /// The proxy (or NASA behind it) answered with a non-2xx status.
    #[error("HTTP status {code}")]
    HttpStatus { code: u16 },

    /// The response body was not in the expected shape.
    #[error("Unexpected response: {message}")]
    Decode { message: String },
}

impl FetchError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns `true` if re-issuing the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::HttpStatus { code } => *code >= 500 || *code == 429,
            Self::Decode { .. } => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<astrodash_api::Error> for FetchError {
    fn from(err: astrodash_api::Error) -> Self {
        if let Some(code) = err.status_code() {
            return FetchError::HttpStatus { code };
        }
        match err {
            astrodash_api::Error::Upstream { message, .. }
            | astrodash_api::Error::Deserialization { message, .. } => {
                FetchError::Decode { message }
            }
            other => FetchError::Network {
                message: other.to_string(),
            },
        }
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// `Store::update` was called from inside the render callback.
    #[error("Store update attempted from inside the render callback")]
    ReentrantUpdate,

    #[error("Unknown rover: {name}")]
    UnknownRover { name: String },

    /// The proxy client cannot be built from the given settings.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<astrodash_api::Error> for CoreError {
    fn from(err: astrodash_api::Error) -> Self {
        CoreError::Fetch(err.into())
    }
}
