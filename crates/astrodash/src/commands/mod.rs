//! Command dispatch: bridges CLI args -> dashboard loads -> output formatting.

pub mod apod;
pub mod config_cmd;
pub mod dashboard;
pub mod manifest;
pub mod photos;
pub mod rovers;
pub mod util;

use astrodash_config::Config;
use astrodash_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a proxy-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Apod => apod::handle(dashboard, global).await,
        Command::Photos(args) => photos::handle(dashboard, args, global).await,
        Command::Manifest(args) => manifest::handle(dashboard, args, global).await,
        Command::Rovers => rovers::handle(dashboard, cfg, global),
        Command::Dashboard(args) => dashboard::handle(dashboard, args, cfg, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
