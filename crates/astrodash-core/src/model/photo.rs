use chrono::NaiveDate;
use serde::Serialize;

/// A single rover photo with the rover facts the dashboard shows beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub id: u64,
    pub sol: Option<u32>,
    pub image_url: String,
    /// Short camera code (`FHAZ`, `NAVCAM`, ...).
    pub camera_name: String,
    pub camera_full_name: Option<String>,
    pub earth_date: Option<NaiveDate>,
    pub rover_name: String,
    pub launch_date: Option<NaiveDate>,
    pub landing_date: Option<NaiveDate>,
    /// Mission status as reported by NASA (`active`, `complete`).
    pub status: String,
}
