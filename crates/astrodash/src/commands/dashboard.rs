//! One-shot dashboard: load everything the view needs, print it once.

use astrodash_config::Config;
use astrodash_core::view;
use astrodash_core::{Dashboard, LoadOutcome};
use tracing::warn;

use crate::cli::{DashboardArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    dashboard: &Dashboard,
    args: DashboardArgs,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let rover = match args.rover.as_deref() {
        Some(name) => Some(util::parse_rover(name)?),
        None => cfg.default_rover()?,
    };

    let spinner = util::spinner("Loading the dashboard...", global.quiet);
    let (apod, photos) = tokio::join!(dashboard.load_apod(), async {
        match rover {
            Some(rover) => dashboard.select_rover(rover).await.map(Some),
            None => Ok(None::<LoadOutcome>),
        }
    });
    spinner.finish_and_clear();

    // Load failures are part of the view; only a bad selection aborts.
    if let Err(e) = apod {
        warn!(error = %e, "picture of the day unavailable");
    }
    match photos {
        Err(e @ astrodash_core::CoreError::UnknownRover { .. }) => return Err(e.into()),
        Err(e) => warn!(error = %e, "rover photos unavailable"),
        Ok(_) => {}
    }

    let rendered = view::render(&dashboard.snapshot());
    let out = match global.output {
        OutputFormat::Table | OutputFormat::Plain => rendered.to_string(),
        _ => output::render_single(
            &global.output,
            &rendered,
            ToString::to_string,
            ToString::to_string,
        ),
    };
    output::print_output(out.trim_end(), global.quiet);
    Ok(())
}
