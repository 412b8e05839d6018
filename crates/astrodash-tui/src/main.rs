//! `astrodash-tui` — terminal dashboard for NASA's Astronomy Picture of the
//! Day and the latest Mars rover photos.
//!
//! Built on [ratatui](https://ratatui.rs) over the shared
//! [`Dashboard`](astrodash_core::Dashboard). Two screens, navigable with
//! `1`/`2` or Tab: the picture of the day and the rover photo browser.
//!
//! Logs go to a file (default `/tmp/astrodash-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use astrodash_core::Dashboard;

use crate::app::App;

/// Terminal dashboard for the NASA picture of the day and Mars rover photos.
#[derive(Parser, Debug)]
#[command(name = "astrodash-tui", version, about)]
struct Cli {
    /// Path to config file
    #[arg(long, env = "ASTRODASH_CONFIG")]
    config: Option<PathBuf>,

    /// Proxy base URL (overrides config)
    #[arg(short = 'u', long, env = "ASTRODASH_PROXY_URL")]
    proxy_url: Option<String>,

    /// Rover to select on startup (overrides config)
    #[arg(short = 'r', long)]
    rover: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/astrodash-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Default filter for our own crates at the `-v` level.
fn default_filter(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    ["astrodash_tui", "astrodash_core", "astrodash_api"]
        .map(|target| format!("{target}={level}"))
        .join(",")
}

/// Split the log path into the directory and file name the appender wants.
fn log_location(path: &Path) -> (&Path, &OsStr) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file = path.file_name().unwrap_or(OsStr::new("astrodash-tui.log"));
    (dir, file)
}

/// File-only tracing: anything on stdout or stderr would tear the UI.
/// The returned guard flushes on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose)));

    let (dir, file) = log_location(&cli.log_file);
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let mut cfg = match &cli.config {
        Some(path) => astrodash_config::load_config_from(path)?,
        None => astrodash_config::load_config()?,
    };
    if let Some(url) = &cli.proxy_url {
        cfg.proxy.url.clone_from(url);
    }
    if let Some(rover) = &cli.rover {
        cfg.dashboard.default_rover = Some(rover.clone());
    }

    let client_config = cfg.to_client_config()?;
    let initial_rover = cfg.default_rover()?;

    info!(proxy = %client_config.proxy_url, "starting astrodash-tui");

    let dashboard = Dashboard::new(&client_config)?;
    let mut app = App::new(dashboard, initial_rover);
    app.run().await?;

    Ok(())
}
