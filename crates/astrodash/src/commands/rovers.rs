//! Configured rover listing. Answers from configuration alone.

use serde::Serialize;
use tabled::Tabled;

use astrodash_config::Config;
use astrodash_core::{Dashboard, Rover};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct RoverEntry {
    name: Rover,
    label: &'static str,
    default: bool,
}

#[derive(Tabled)]
struct RoverRow {
    #[tabled(rename = "Rover")]
    label: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Default")]
    default: &'static str,
}

impl From<&RoverEntry> for RoverRow {
    fn from(r: &RoverEntry) -> Self {
        Self {
            label: r.label,
            name: r.name.to_string(),
            default: if r.default { "*" } else { "" },
        }
    }
}

pub fn handle(dashboard: &Dashboard, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let default = cfg.default_rover()?;
    let entries: Vec<RoverEntry> = dashboard
        .snapshot()
        .rovers
        .iter()
        .map(|&name| RoverEntry {
            name,
            label: name.label(),
            default: default == Some(name),
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &entries,
        |r| RoverRow::from(r),
        |r| r.name.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
