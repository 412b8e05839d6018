//! Rover mission manifest.

use std::fmt::Write as _;

use astrodash_core::{Dashboard, Manifest};

use crate::cli::{GlobalOpts, RoverArg};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(m: &Manifest, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading(&m.rover_name, color));
    let _ = writeln!(out, "Status:       {}", output::status(&m.status, color));
    let _ = writeln!(out, "Launched:     {}", util::date_cell(m.launch_date));
    let _ = writeln!(out, "Landed:       {}", util::date_cell(m.landing_date));
    let _ = writeln!(
        out,
        "Latest sol:   {}",
        m.max_sol.map_or_else(|| "-".into(), |sol| sol.to_string())
    );
    let _ = writeln!(out, "Latest photo: {}", util::date_cell(m.max_date));
    let _ = write!(
        out,
        "Total photos: {}",
        m.total_photos.map_or_else(|| "-".into(), |n| n.to_string())
    );
    out
}

pub async fn handle(
    dashboard: &Dashboard,
    args: RoverArg,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let rover = util::parse_rover(&args.rover)?;

    let spinner = util::spinner(
        &format!("Fetching the {} manifest...", rover.label()),
        global.quiet,
    );
    let result = dashboard.load_manifest(rover).await;
    spinner.finish_and_clear();
    result?;

    let snap = dashboard.snapshot();
    let Some(manifest) = snap.manifest_for(rover) else {
        return Err(CliError::BadResponse {
            message: format!("no manifest was returned for {rover}"),
        });
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        manifest.as_ref(),
        |m| detail(m, color),
        |m| m.status.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
