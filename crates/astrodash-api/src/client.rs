// Proxy HTTP client
//
// Wraps `reqwest::Client` with proxy URL construction, envelope unwrapping,
// and status / upstream-error mapping. Each endpoint method issues exactly
// one GET and returns the unwrapped payload.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{ApodEnvelope, ManifestEnvelope, PhotosEnvelope, RawApod, RawManifest, RawPhoto};
use crate::transport::TransportConfig;

/// Maximum number of body bytes kept in error messages.
const BODY_PREVIEW_LEN: usize = 200;

/// Raw HTTP client for the astrodash proxy.
///
/// The proxy exposes `/apod`, `/rovers/{name}` and `/manifests/{name}`,
/// each forwarding to NASA with a server-held API key. The client never
/// sees that key.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ProxyClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the proxy root (e.g. `http://localhost:3000`). A path
    /// prefix is allowed when the proxy is mounted under a sub-path.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout: TransportConfig::default().timeout,
        }
    }

    /// The proxy base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /apod` — today's Astronomy Picture of the Day.
    pub async fn apod(&self) -> Result<RawApod, Error> {
        let url = self.endpoint(&["apod"])?;
        let envelope: ApodEnvelope = self.get(url).await?;
        if let Some(err) = envelope.image.upstream_error() {
            return Err(err);
        }
        Ok(envelope.image)
    }

    /// `GET /rovers/{name}` — latest photos for a rover (bounded list).
    pub async fn rover_photos(&self, rover: &str) -> Result<Vec<RawPhoto>, Error> {
        let url = self.endpoint(&["rovers", rover])?;
        let envelope: PhotosEnvelope = self.get(url).await?;
        trace!(rover, count = envelope.data.len(), "rover photos received");
        Ok(envelope.data)
    }

    /// `GET /manifests/{name}` — mission manifest for a rover.
    pub async fn manifest(&self, rover: &str) -> Result<RawManifest, Error> {
        let url = self.endpoint(&["manifests", rover])?;
        let envelope: ManifestEnvelope = self.get(url).await?;
        Ok(envelope.data)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                Error::Transport(e)
            }
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

/// First `BODY_PREVIEW_LEN` bytes of `body`, cut on a char boundary.
fn preview(body: &str) -> &str {
    if body.len() <= BODY_PREVIEW_LEN {
        return body;
    }
    let mut end = BODY_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
