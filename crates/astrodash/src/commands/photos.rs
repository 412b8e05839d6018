//! Rover photo listing.

use tabled::Tabled;

use astrodash_core::view::NO_PHOTOS_MESSAGE;
use astrodash_core::{Dashboard, Photo};

use crate::cli::{GlobalOpts, OutputFormat, PhotosArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PhotoRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Sol")]
    sol: String,
    #[tabled(rename = "Earth Date")]
    earth_date: String,
    #[tabled(rename = "Camera")]
    camera: String,
    #[tabled(rename = "Image")]
    image_url: String,
}

impl From<&Photo> for PhotoRow {
    fn from(p: &Photo) -> Self {
        Self {
            id: p.id,
            sol: p.sol.map(|sol| sol.to_string()).unwrap_or_default(),
            earth_date: util::date_cell(p.earth_date),
            camera: p.camera_name.clone(),
            image_url: p.image_url.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: PhotosArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let rover = util::parse_rover(&args.rover)?;

    let spinner = util::spinner(
        &format!("Fetching {} photos...", rover.label()),
        global.quiet,
    );
    let result = dashboard.load_photos(rover).await;
    spinner.finish_and_clear();
    result?;

    let snap = dashboard.snapshot();
    let photos: Vec<Photo> = snap
        .photos_for(rover)
        .map(|all| all.iter().take(args.limit).cloned().collect())
        .unwrap_or_default();

    if photos.is_empty() && matches!(global.output, OutputFormat::Table) {
        output::print_output(NO_PHOTOS_MESSAGE, global.quiet);
        return Ok(());
    }

    let out = output::render_list(
        &global.output,
        &photos,
        |p| PhotoRow::from(p),
        |p| p.image_url.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
