// ── Wire → domain normalization ──
//
// Runs at the loader boundary. Missing optional fields become `None`,
// malformed dates are dropped rather than failing the whole payload, and
// records that cannot be displayed at all (a photo without an image URL)
// are skipped. Only an APOD without a media URL is a decode error.

use std::sync::Arc;

use astrodash_api::{RawApod, RawManifest, RawPhoto};
use chrono::NaiveDate;
use tracing::debug;

use crate::error::FetchError;
use crate::model::{Apod, ApodMedia, Manifest, Photo, Rover};

fn parse_date(field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(field, value = raw, error = %e, "ignoring unparseable date");
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Normalize the APOD payload.
pub fn apod(raw: RawApod) -> Result<Apod, FetchError> {
    let url = non_empty(raw.url).ok_or_else(|| FetchError::decode("APOD is missing its url"))?;
    let media = match raw.media_type.as_deref() {
        Some("video") => ApodMedia::Video { url },
        _ => ApodMedia::Image {
            url,
            hd_url: non_empty(raw.hdurl),
        },
    };

    Ok(Apod {
        date: parse_date("date", raw.date.as_deref()),
        title: raw.title.unwrap_or_default(),
        explanation: raw.explanation.unwrap_or_default(),
        media,
        copyright: non_empty(raw.copyright).map(|c| c.trim().to_owned()),
    })
}

/// Normalize a single photo record. `None` if it has no image to show.
pub fn photo(raw: RawPhoto, requested: Rover) -> Option<Photo> {
    let Some(image_url) = non_empty(raw.img_src) else {
        debug!(id = ?raw.id, "skipping photo without img_src");
        return None;
    };
    let camera = raw.camera.unwrap_or_default();
    let rover = raw.rover.unwrap_or_default();

    Some(Photo {
        id: raw.id.unwrap_or_default(),
        sol: raw.sol,
        image_url,
        camera_name: non_empty(camera.name).unwrap_or_else(|| "unknown".into()),
        camera_full_name: non_empty(camera.full_name),
        earth_date: parse_date("earth_date", raw.earth_date.as_deref()),
        rover_name: non_empty(rover.name).unwrap_or_else(|| requested.label().into()),
        launch_date: parse_date("launch_date", rover.launch_date.as_deref()),
        landing_date: parse_date("landing_date", rover.landing_date.as_deref()),
        status: non_empty(rover.status).unwrap_or_else(|| "unknown".into()),
    })
}

/// Normalize a rover's photo list, dropping undisplayable records.
pub fn photos(raw: Vec<RawPhoto>, requested: Rover) -> Arc<[Photo]> {
    raw.into_iter()
        .filter_map(|p| photo(p, requested))
        .collect()
}

/// Normalize a mission manifest.
pub fn manifest(raw: RawManifest, requested: Rover) -> Manifest {
    Manifest {
        rover_name: non_empty(raw.name).unwrap_or_else(|| requested.label().into()),
        status: non_empty(raw.status).unwrap_or_else(|| "unknown".into()),
        launch_date: parse_date("launch_date", raw.launch_date.as_deref()),
        landing_date: parse_date("landing_date", raw.landing_date.as_deref()),
        max_sol: raw.max_sol,
        max_date: parse_date("max_date", raw.max_date.as_deref()),
        total_photos: raw.total_photos,
    }
}
