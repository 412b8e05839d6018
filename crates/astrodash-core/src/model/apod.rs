use chrono::NaiveDate;
use serde::Serialize;

/// Astronomy Picture of the Day, normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Apod {
    /// Publication date. `None` when NASA omitted or mangled it.
    pub date: Option<NaiveDate>,
    pub title: String,
    pub explanation: String,
    pub media: ApodMedia,
    pub copyright: Option<String>,
}

/// Some days the "picture" is a video embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ApodMedia {
    Image { url: String, hd_url: Option<String> },
    Video { url: String },
}

impl ApodMedia {
    pub fn url(&self) -> &str {
        match self {
            Self::Image { url, .. } | Self::Video { url } => url,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video { .. })
    }
}

impl Apod {
    /// Whether this picture was published on `today`.
    pub fn is_from(&self, today: NaiveDate) -> bool {
        self.date == Some(today)
    }
}
