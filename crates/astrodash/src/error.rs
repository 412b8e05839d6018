//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use astrodash_config::ConfigError;
use astrodash_core::{CoreError, FetchError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Proxy ────────────────────────────────────────────────────────

    #[error("Could not reach the proxy: {message}")]
    #[diagnostic(
        code(astrodash::connection_failed),
        help(
            "Check that the proxy is running and that --proxy-url\n\
             (or proxy.url in the config file) points at it."
        )
    )]
    ConnectionFailed { message: String },

    #[error("The proxy answered with HTTP {code}")]
    #[diagnostic(
        code(astrodash::http_status),
        help("A 5xx status usually means NASA's API failed the request; try again later.")
    )]
    HttpStatus { code: u16 },

    #[error("Unexpected response from the proxy: {message}")]
    #[diagnostic(code(astrodash::bad_response))]
    BadResponse { message: String },

    // ── Input ────────────────────────────────────────────────────────

    #[error("Unknown rover '{name}'")]
    #[diagnostic(
        code(astrodash::unknown_rover),
        help("Run: astrodash rovers to see the configured rovers")
    )]
    UnknownRover { name: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(astrodash::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(code(astrodash::config_exists), help("Use --force to overwrite it."))]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(astrodash::config),
        help("Check the config file syntax and ASTRODASH_* environment variables.")
    )]
    Config(Box<figment::Error>),

    // ── Internal ─────────────────────────────────────────────────────

    #[error("Internal error: {message}")]
    #[diagnostic(code(astrodash::internal))]
    Internal { message: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::HttpStatus { code: 404 } => exit_code::NOT_FOUND,
            Self::UnknownRover { .. } | Self::Validation { .. } | Self::ConfigExists { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<FetchError> for CliError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network { message } => CliError::ConnectionFailed { message },
            FetchError::HttpStatus { code } => CliError::HttpStatus { code },
            FetchError::Decode { message } => CliError::BadResponse { message },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Fetch(fetch) => fetch.into(),
            CoreError::UnknownRover { name } => CliError::UnknownRover { name },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::ReentrantUpdate => CliError::Internal {
                message: CoreError::ReentrantUpdate.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_map_to_exit_codes() {
        let err: CliError = CoreError::Fetch(FetchError::HttpStatus { code: 404 }).into();
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);

        let err: CliError = FetchError::Network {
            message: "connection refused".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::CONNECTION);

        let err: CliError = FetchError::HttpStatus { code: 500 }.into();
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn unknown_rover_is_a_usage_error() {
        let err: CliError = CoreError::UnknownRover {
            name: "sojourner".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn unusable_client_settings_are_a_usage_error() {
        let err: CliError = CoreError::Config {
            message: "proxy URL data:,x cannot carry paths".into(),
        }
        .into();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "config"));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
