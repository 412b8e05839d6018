//! Astronomy Picture of the Day.

use std::fmt::Write as _;

use astrodash_core::{Apod, ApodMedia, Dashboard};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(apod: &Apod, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}",
        output::heading(&apod.title, color),
        util::date_cell(apod.date)
    );
    match &apod.media {
        ApodMedia::Image { url, hd_url } => {
            let _ = writeln!(out, "Image:    {url}");
            if let Some(hd) = hd_url {
                let _ = writeln!(out, "HD image: {hd}");
            }
        }
        ApodMedia::Video { url } => {
            let _ = writeln!(out, "See today's featured video here: {url}");
        }
    }
    if let Some(c) = &apod.copyright {
        let _ = writeln!(out, "Credit:   {c}");
    }
    let _ = writeln!(out);
    out.push_str(&apod.explanation);
    out
}

pub async fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let spinner = util::spinner("Fetching the picture of the day...", global.quiet);
    let result = dashboard.load_apod().await;
    spinner.finish_and_clear();
    result?;

    let snap = dashboard.snapshot();
    let Some(apod) = snap.apod.as_deref() else {
        return Err(CliError::BadResponse {
            message: "no picture of the day was returned".into(),
        });
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        apod,
        |a| detail(a, color),
        |a| a.media.url().to_owned(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
