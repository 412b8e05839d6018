//! Shared configuration for the astrodash CLI and TUI.
//!
//! One TOML file plus `ASTRODASH_*` environment overrides, translated to
//! `astrodash_core::ClientConfig`. The core crate never reads either; the
//! binaries load a [`Config`] here and hand the result in.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use astrodash_core::config::DEFAULT_PROXY_URL;
use astrodash_core::store::DEFAULT_USER_NAME;
use astrodash_core::{ClientConfig, Rover};

/// Prefix for environment overrides. Nested keys use `__`:
/// `ASTRODASH_PROXY__URL`, `ASTRODASH_DASHBOARD__USER_NAME`.
pub const ENV_PREFIX: &str = "ASTRODASH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub proxy: ProxySettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    /// CLI presentation defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

/// Where the NASA proxy lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxySettings {
    #[serde(default = "default_proxy_url")]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            url: default_proxy_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DashboardSettings {
    #[serde(default = "default_user_name")]
    pub user_name: String,

    /// Rover wire names, in tab order.
    #[serde(default = "default_rovers")]
    pub rovers: Vec<String>,

    /// Rover selected on startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_rover: Option<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
            rovers: default_rovers(),
            default_rover: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_proxy_url() -> String {
    DEFAULT_PROXY_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_user_name() -> String {
    DEFAULT_USER_NAME.into()
}
fn default_rovers() -> Vec<String> {
    Rover::DEFAULT_ROSTER
        .iter()
        .map(ToString::to_string)
        .collect()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "astrodash", "astrodash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("astrodash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to runtime config ───────────────────────────────────

impl Config {
    /// Configured rovers, parsed and de-duplicated in order.
    pub fn rovers(&self) -> Result<Vec<Rover>, ConfigError> {
        let mut rovers = Vec::with_capacity(self.dashboard.rovers.len());
        for name in &self.dashboard.rovers {
            let rover = parse_rover("dashboard.rovers", name)?;
            if !rovers.contains(&rover) {
                rovers.push(rover);
            }
        }
        if rovers.is_empty() {
            return Err(ConfigError::invalid(
                "dashboard.rovers",
                "at least one rover is required",
            ));
        }
        Ok(rovers)
    }

    /// The startup rover, checked against the configured list.
    pub fn default_rover(&self) -> Result<Option<Rover>, ConfigError> {
        let Some(name) = self.dashboard.default_rover.as_deref() else {
            return Ok(None);
        };
        let rover = parse_rover("dashboard.default_rover", name)?;
        if !self.rovers()?.contains(&rover) {
            return Err(ConfigError::invalid(
                "dashboard.default_rover",
                format!("'{name}' is not in dashboard.rovers"),
            ));
        }
        Ok(Some(rover))
    }

    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        let proxy_url = Url::parse(&self.proxy.url)
            .map_err(|e| ConfigError::invalid("proxy.url", format!("{e}: {}", self.proxy.url)))?;
        if !matches!(proxy_url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "proxy.url",
                format!("unsupported scheme '{}'", proxy_url.scheme()),
            ));
        }
        if self.proxy.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "proxy.timeout_secs",
                "must be greater than zero",
            ));
        }

        Ok(ClientConfig {
            proxy_url,
            timeout: Duration::from_secs(self.proxy.timeout_secs),
            user_name: self.dashboard.user_name.trim().to_owned(),
            rovers: self.rovers()?,
        })
    }
}

fn parse_rover(field: &str, name: &str) -> Result<Rover, ConfigError> {
    name.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(field, format!("unknown rover '{name}'")))
}
