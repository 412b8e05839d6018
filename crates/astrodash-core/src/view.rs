//! Pure view model derived from a [`Snapshot`].
//!
//! [`render`] never touches the store or the network: the same snapshot
//! always yields the same [`DashboardView`]. Data the view is missing is
//! reported separately by [`data_needs`], for the caller to fetch once the
//! render has returned.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{ApodMedia, Photo, ResourceKey, Rover};
use crate::store::Snapshot;

/// Maximum photo cards shown for a rover.
pub const PHOTO_DISPLAY_LIMIT: usize = 50;

pub const NO_PHOTOS_MESSAGE: &str = "No photos available for the selected rover.";

pub const DASHBOARD_TITLE: &str = "Mars Rover Dashboard";

const UNKNOWN: &str = "unknown";

// ── View types ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub version: u64,
    pub greeting: String,
    pub apod: ApodView,
    pub rovers: Vec<RoverTab>,
    pub photos: PhotosView,
    pub manifest: Option<ManifestSummary>,
    /// Resource keys still in flight, in key order.
    pub loading: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ApodView {
    Loading,
    Missing,
    Failed { message: String },
    Image {
        title: String,
        date: String,
        url: String,
        hd_url: Option<String>,
        explanation: String,
        copyright: Option<String>,
    },
    Video {
        title: String,
        date: String,
        url: String,
        explanation: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoverTab {
    pub rover: Rover,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PhotosView {
    NoSelection,
    Loading { rover: Rover },
    Empty { rover: Rover },
    Failed { rover: Rover, message: String },
    Photos {
        rover: Rover,
        cards: Vec<PhotoCard>,
        /// Photos available before the display limit was applied.
        total: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoCard {
    pub id: u64,
    pub image_url: String,
    pub earth_date: String,
    pub camera: String,
    pub rover_name: String,
    pub launch_date: String,
    pub landing_date: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSummary {
    pub rover_name: String,
    pub status: String,
    pub launch_date: String,
    pub landing_date: String,
    pub max_sol: Option<u32>,
    pub max_date: String,
    pub total_photos: Option<u64>,
}

/// A resource the current snapshot lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataNeed {
    pub key: ResourceKey,
    /// Bypass the cache: the cached value exists but is out of date.
    pub refresh: bool,
}

impl DataNeed {
    pub fn load(key: ResourceKey) -> Self {
        Self {
            key,
            refresh: false,
        }
    }

    pub fn refresh(key: ResourceKey) -> Self {
        Self { key, refresh: true }
    }
}

// ── Rendering ────────────────────────────────────────────────────────

fn date_or_unknown(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| UNKNOWN.to_owned(), |d| d.format("%Y-%m-%d").to_string())
}

pub fn greeting(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        "Hello!".to_owned()
    } else {
        format!("Welcome, {name}!")
    }
}

fn photo_card(photo: &Photo) -> PhotoCard {
    PhotoCard {
        id: photo.id,
        image_url: photo.image_url.clone(),
        earth_date: date_or_unknown(photo.earth_date),
        camera: photo
            .camera_full_name
            .clone()
            .unwrap_or_else(|| photo.camera_name.clone()),
        rover_name: photo.rover_name.clone(),
        launch_date: date_or_unknown(photo.launch_date),
        landing_date: date_or_unknown(photo.landing_date),
        status: photo.status.clone(),
    }
}

fn apod_view(snapshot: &Snapshot) -> ApodView {
    let Some(apod) = snapshot.apod.as_deref() else {
        if snapshot.is_loading_key(ResourceKey::Apod) {
            return ApodView::Loading;
        }
        return match snapshot.error_for(ResourceKey::Apod) {
            Some(err) => ApodView::Failed {
                message: err.to_string(),
            },
            None => ApodView::Missing,
        };
    };

    let date = date_or_unknown(apod.date);
    match &apod.media {
        ApodMedia::Video { url } => ApodView::Video {
            title: apod.title.clone(),
            date,
            url: url.clone(),
            explanation: apod.explanation.clone(),
        },
        ApodMedia::Image { url, hd_url } => ApodView::Image {
            title: apod.title.clone(),
            date,
            url: url.clone(),
            hd_url: hd_url.clone(),
            explanation: apod.explanation.clone(),
            copyright: apod.copyright.clone(),
        },
    }
}

fn photos_view(snapshot: &Snapshot) -> PhotosView {
    let Some(rover) = snapshot.selected_rover else {
        return PhotosView::NoSelection;
    };

    if let Some(photos) = snapshot.photos_for(rover) {
        if photos.is_empty() {
            return PhotosView::Empty { rover };
        }
        return PhotosView::Photos {
            rover,
            cards: photos
                .iter()
                .take(PHOTO_DISPLAY_LIMIT)
                .map(photo_card)
                .collect(),
            total: photos.len(),
        };
    }

    // Not fetched yet counts as loading: the data need is already queued.
    let key = ResourceKey::Photos(rover);
    match snapshot.error_for(key) {
        Some(err) if !snapshot.is_loading_key(key) => PhotosView::Failed {
            rover,
            message: err.to_string(),
        },
        _ => PhotosView::Loading { rover },
    }
}

fn manifest_summary(snapshot: &Snapshot) -> Option<ManifestSummary> {
    let manifest = snapshot.manifest_for(snapshot.selected_rover?)?;
    Some(ManifestSummary {
        rover_name: manifest.rover_name.clone(),
        status: manifest.status.clone(),
        launch_date: date_or_unknown(manifest.launch_date),
        landing_date: date_or_unknown(manifest.landing_date),
        max_sol: manifest.max_sol,
        max_date: date_or_unknown(manifest.max_date),
        total_photos: manifest.total_photos,
    })
}

/// Derive the view for `snapshot`.
pub fn render(snapshot: &Snapshot) -> DashboardView {
    DashboardView {
        version: snapshot.version(),
        greeting: greeting(&snapshot.user.name),
        apod: apod_view(snapshot),
        rovers: snapshot
            .rovers
            .iter()
            .map(|&rover| RoverTab {
                rover,
                label: rover.label(),
                selected: snapshot.selected_rover == Some(rover),
            })
            .collect(),
        photos: photos_view(snapshot),
        manifest: manifest_summary(snapshot),
        loading: snapshot.loading.iter().map(ToString::to_string).collect(),
    }
}

/// Resources `snapshot` is missing, as of local date `today`.
///
/// Keys already loading or marked failed are left out; failures are only
/// retried by an explicit refresh. A stale-dated APOD is asked for at most
/// once per `today`, since NASA's publication date may lag the local one.
pub fn data_needs(snapshot: &Snapshot, today: NaiveDate) -> Vec<DataNeed> {
    let idle =
        |key: ResourceKey| !snapshot.is_loading_key(key) && snapshot.error_for(key).is_none();
    let mut needs = Vec::new();

    if idle(ResourceKey::Apod) {
        match snapshot.apod.as_deref() {
            None => needs.push(DataNeed::load(ResourceKey::Apod)),
            Some(apod) if !apod.is_from(today) && snapshot.apod_checked_on != Some(today) => {
                needs.push(DataNeed::refresh(ResourceKey::Apod));
            }
            Some(_) => {}
        }
    }

    if let Some(rover) = snapshot.selected_rover {
        let photos = ResourceKey::Photos(rover);
        if idle(photos) && snapshot.photos_for(rover).is_none() {
            needs.push(DataNeed::load(photos));
        }
        let manifest = ResourceKey::Manifest(rover);
        if idle(manifest) && snapshot.manifest_for(rover).is_none() {
            needs.push(DataNeed::load(manifest));
        }
    }

    needs
}

// ── Plain-text rendering ─────────────────────────────────────────────

impl fmt::Display for ApodView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => writeln!(f, "Loading the picture of the day..."),
            Self::Missing => writeln!(f, "No picture of the day yet."),
            Self::Failed { message } => {
                writeln!(f, "Could not load the picture of the day: {message}")
            }
            Self::Image {
                title,
                date,
                url,
                explanation,
                copyright,
                ..
            } => {
                writeln!(f, "{title} ({date})")?;
                writeln!(f, "{url}")?;
                if let Some(c) = copyright {
                    writeln!(f, "(c) {c}")?;
                }
                writeln!(f, "{explanation}")
            }
            Self::Video {
                title,
                date,
                url,
                explanation,
            } => {
                writeln!(f, "See today's featured video here: {url}")?;
                writeln!(f, "{title} ({date})")?;
                writeln!(f, "{explanation}")
            }
        }
    }
}

impl fmt::Display for PhotoCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {}", self.image_url)?;
        writeln!(f, "  Image Earth Date: {}", self.earth_date)?;
        writeln!(f, "  Camera: {}", self.camera)?;
        writeln!(f, "  Rover: {}", self.rover_name)?;
        writeln!(f, "  Launch Date: {}", self.launch_date)?;
        writeln!(f, "  Landing Date: {}", self.landing_date)?;
        writeln!(f, "  Status: {}", self.status)
    }
}

impl fmt::Display for PhotosView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection => writeln!(f, "Select a rover to see its latest photos."),
            Self::Loading { rover } => writeln!(f, "Loading {} photos...", rover.label()),
            Self::Empty { .. } => writeln!(f, "{NO_PHOTOS_MESSAGE}"),
            Self::Failed { message, .. } => {
                writeln!(f, "{NO_PHOTOS_MESSAGE}")?;
                writeln!(f, "({message})")
            }
            Self::Photos {
                rover,
                cards,
                total,
            } => {
                writeln!(
                    f,
                    "{} latest photos ({} of {total})",
                    rover.label(),
                    cards.len()
                )?;
                cards.iter().try_for_each(|card| write!(f, "{card}"))
            }
        }
    }
}

impl fmt::Display for ManifestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mission: {} ({})", self.rover_name, self.status)?;
        writeln!(
            f,
            "  Launched {}, landed {}",
            self.launch_date, self.landing_date
        )?;
        let sol = self
            .max_sol
            .map_or_else(|| UNKNOWN.to_owned(), |sol| sol.to_string());
        let total = self
            .total_photos
            .map_or_else(|| UNKNOWN.to_owned(), |n| n.to_string());
        writeln!(
            f,
            "  Latest sol {sol} on {}, {total} photos total",
            self.max_date
        )
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.greeting)?;
        writeln!(f)?;
        writeln!(f, "== Astronomy Picture of the Day ==")?;
        write!(f, "{}", self.apod)?;
        writeln!(f)?;
        writeln!(f, "== {DASHBOARD_TITLE} ==")?;
        let tabs: Vec<String> = self
            .rovers
            .iter()
            .map(|tab| {
                if tab.selected {
                    format!("[{}]", tab.label)
                } else {
                    tab.label.to_owned()
                }
            })
            .collect();
        writeln!(f, "Rovers: {}", tabs.join(" "))?;
        if let Some(manifest) = &self.manifest {
            write!(f, "{manifest}")?;
        }
        write!(f, "{}", self.photos)?;
        if !self.loading.is_empty() {
            writeln!(f)?;
            writeln!(f, "Loading: {}", self.loading.join(", "))?;
        }
        Ok(())
    }
}
