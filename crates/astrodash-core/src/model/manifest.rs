use chrono::NaiveDate;
use serde::Serialize;

/// Mission manifest summary for a rover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub rover_name: String,
    pub status: String,
    pub launch_date: Option<NaiveDate>,
    pub landing_date: Option<NaiveDate>,
    pub max_sol: Option<u32>,
    pub max_date: Option<NaiveDate>,
    pub total_photos: Option<u64>,
}
