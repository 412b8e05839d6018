// Wire types for the proxy's JSON bodies.
//
// Every field is optional: the proxy relays NASA's payloads more or less
// verbatim and NASA omits fields freely. `astrodash-core` normalizes these
// into fixed records and decides what a missing field means.

use serde::Deserialize;

use crate::error::Error;

// ── Envelopes ────────────────────────────────────────────────────────

/// `GET /apod` → `{"image": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ApodEnvelope {
    pub image: RawApod,
}

/// `GET /rovers/:name` → `{"data": [...]}`
#[derive(Debug, Deserialize)]
pub(crate) struct PhotosEnvelope {
    #[serde(default, alias = "latest_photos", alias = "photos")]
    pub data: Vec<RawPhoto>,
}

/// `GET /manifests/:name` → `{"data": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ManifestEnvelope {
    #[serde(alias = "photo_manifest", alias = "manifest")]
    pub data: RawManifest,
}

// ── APOD ─────────────────────────────────────────────────────────────

/// Astronomy Picture of the Day as relayed by the proxy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawApod {
    pub date: Option<String>,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub url: Option<String>,
    pub hdurl: Option<String>,
    pub media_type: Option<String>,
    pub copyright: Option<String>,
    pub service_version: Option<String>,
    /// `{"error": {"code": "API_KEY_INVALID", "message": "..."}}`
    pub error: Option<RawUpstreamError>,
    /// `{"code": 400, "msg": "..."}`
    pub code: Option<u16>,
    pub msg: Option<String>,
}

/// Error object NASA returns in place of a payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawUpstreamError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl RawApod {
    /// The upstream error embedded in this body, if NASA returned one.
    pub fn upstream_error(&self) -> Option<Error> {
        if let Some(code) = self.code {
            return Some(Error::Upstream {
                code: Some(code),
                message: self.msg.clone().unwrap_or_default(),
            });
        }
        let err = self.error.as_ref()?;
        let message = match (&err.code, &err.message) {
            (Some(code), Some(msg)) => format!("{code}: {msg}"),
            (Some(code), None) => code.clone(),
            (None, Some(msg)) => msg.clone(),
            (None, None) => "unknown upstream error".into(),
        };
        Some(Error::Upstream {
            code: None,
            message,
        })
    }
}

// ── Rover photos ─────────────────────────────────────────────────────

/// One Mars rover photo record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPhoto {
    pub id: Option<u64>,
    pub sol: Option<u32>,
    pub camera: Option<RawCamera>,
    pub img_src: Option<String>,
    pub earth_date: Option<String>,
    pub rover: Option<RawRover>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCamera {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRover {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub landing_date: Option<String>,
    pub launch_date: Option<String>,
    pub status: Option<String>,
}

// ── Manifests ────────────────────────────────────────────────────────

/// Mission manifest for a rover.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawManifest {
    pub name: Option<String>,
    pub landing_date: Option<String>,
    pub launch_date: Option<String>,
    pub status: Option<String>,
    pub max_sol: Option<u32>,
    pub max_date: Option<String>,
    pub total_photos: Option<u64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn photos_envelope_accepts_aliases() {
        let body = json!({ "latest_photos": [{ "id": 1, "img_src": "a.jpg" }] });
        let env: PhotosEnvelope = serde_json::from_value(body).unwrap();
        assert_eq!(env.data.len(), 1);
        assert_eq!(env.data[0].img_src.as_deref(), Some("a.jpg"));

        let env: PhotosEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(env.data.is_empty());
    }

    #[test]
    fn manifest_envelope_accepts_nasa_shape() {
        let body = json!({ "photo_manifest": { "name": "Spirit", "max_sol": 2208 } });
        let env: ManifestEnvelope = serde_json::from_value(body).unwrap();
        assert_eq!(env.data.name.as_deref(), Some("Spirit"));
        assert_eq!(env.data.max_sol, Some(2208));
    }

    #[test]
    fn apod_numeric_error_maps_to_coded_upstream() {
        let apod: RawApod =
            serde_json::from_value(json!({ "code": 400, "msg": "Date must be between" })).unwrap();
        match apod.upstream_error() {
            Some(Error::Upstream { code, message }) => {
                assert_eq!(code, Some(400));
                assert_eq!(message, "Date must be between");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn apod_error_object_maps_to_uncoded_upstream() {
        let apod: RawApod = serde_json::from_value(json!({
            "error": { "code": "API_KEY_INVALID", "message": "An invalid api_key was supplied" }
        }))
        .unwrap();
        match apod.upstream_error() {
            Some(Error::Upstream { code, message }) => {
                assert_eq!(code, None);
                assert!(message.starts_with("API_KEY_INVALID"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn well_formed_apod_has_no_upstream_error() {
        let apod: RawApod = serde_json::from_value(json!({
            "date": "2024-03-01",
            "media_type": "image",
            "url": "https://apod.nasa.gov/x.jpg"
        }))
        .unwrap();
        assert!(apod.upstream_error().is_none());
    }
}
