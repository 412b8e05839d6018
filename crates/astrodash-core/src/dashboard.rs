// ── Dashboard facade ──
//
// Wires the proxy client, one fetch cache per resource type, the request
// tracker, and the store together. Every load follows the same flow:
// take a ticket, flag the key as loading, resolve through the cache, and
// merge the outcome only if the ticket is still current.

use std::future::Future;
use std::sync::Arc;

use astrodash_api::{ProxyClient, TransportConfig};
use chrono::{Local, NaiveDate};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{EntryState, FetchCache, RequestTracker};
use crate::config::ClientConfig;
use crate::convert;
use crate::error::{CoreError, FetchError};
use crate::model::{Apod, Manifest, Photo, ResourceKey, Rover, User};
use crate::store::{DashboardState, Snapshot, StatePatch, Store};
use crate::view::{self, DataNeed};

/// Result of a load that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was merged into the store.
    Applied,
    /// A newer request for the same key was issued meanwhile; the result
    /// was discarded.
    Stale,
}

/// The entry point for UI consumers.
///
/// Cheaply cloneable via `Arc<DashboardInner>`, so loads can be spawned
/// as independent tasks.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    client: ProxyClient,
    store: Arc<Store>,
    apod: FetchCache<Arc<Apod>>,
    photos: FetchCache<Arc<[Photo]>>,
    manifests: FetchCache<Arc<Manifest>>,
    tracker: RequestTracker<ResourceKey>,
}

impl Dashboard {
    /// Build a dashboard talking to `config.proxy_url`.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        if config.proxy_url.cannot_be_a_base() {
            return Err(CoreError::Config {
                message: format!("proxy URL {} cannot carry paths", config.proxy_url),
            });
        }
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = ProxyClient::new(config.proxy_url.clone(), &transport)
            .map_err(|e| CoreError::Config {
                message: e.to_string(),
            })?;
        Ok(Self::with_client(client, config))
    }

    /// Build a dashboard around an existing client. The proxy URL and
    /// timeout in `config` are ignored.
    pub fn with_client(client: ProxyClient, config: &ClientConfig) -> Self {
        let initial = DashboardState {
            user: User::new(config.user_name.clone()),
            rovers: config.rovers.clone(),
            ..DashboardState::default()
        };

        Self {
            inner: Arc::new(DashboardInner {
                client,
                store: Arc::new(Store::new(initial)),
                apod: FetchCache::new(),
                photos: FetchCache::new(),
                manifests: FetchCache::new(),
                tracker: RequestTracker::new(),
            }),
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.inner.store
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.store.snapshot()
    }

    pub fn client(&self) -> &ProxyClient {
        &self.inner.client
    }

    // ── Loads ────────────────────────────────────────────────────────

    /// Load `key` through its cache.
    pub async fn load(&self, key: ResourceKey) -> Result<LoadOutcome, CoreError> {
        match key {
            ResourceKey::Apod => self.load_apod().await,
            ResourceKey::Photos(rover) => self.load_photos(rover).await,
            ResourceKey::Manifest(rover) => self.load_manifest(rover).await,
        }
    }

    pub async fn load_apod(&self) -> Result<LoadOutcome, CoreError> {
        let client = self.inner.client.clone();
        let loader = move || async move {
            let raw = client.apod().await.map_err(FetchError::from)?;
            convert::apod(raw).map(Arc::new)
        };
        self.run(ResourceKey::Apod, &self.inner.apod, loader, |_, apod| {
            StatePatch::new()
                .apod(Some(apod))
                .apod_checked_on(Some(Local::now().date_naive()))
        })
        .await
    }

    pub async fn load_photos(&self, rover: Rover) -> Result<LoadOutcome, CoreError> {
        let client = self.inner.client.clone();
        let loader = move || async move {
            let raw = client
                .rover_photos(rover.as_path())
                .await
                .map_err(FetchError::from)?;
            Ok(convert::photos(raw, rover))
        };
        self.run(
            ResourceKey::Photos(rover),
            &self.inner.photos,
            loader,
            move |state, photos| StatePatch::new().photos(state.photos_with(rover, photos)),
        )
        .await
    }

    pub async fn load_manifest(&self, rover: Rover) -> Result<LoadOutcome, CoreError> {
        let client = self.inner.client.clone();
        let loader = move || async move {
            let raw = client
                .manifest(rover.as_path())
                .await
                .map_err(FetchError::from)?;
            Ok(Arc::new(convert::manifest(raw, rover)))
        };
        self.run(
            ResourceKey::Manifest(rover),
            &self.inner.manifests,
            loader,
            move |state, manifest| {
                StatePatch::new().manifests(state.manifests_with(rover, manifest))
            },
        )
        .await
    }

    /// Select `rover` and load its photos and manifest concurrently.
    ///
    /// The selection is applied before either request is issued, so the
    /// view switches tabs immediately.
    pub async fn select_rover(&self, rover: Rover) -> Result<LoadOutcome, CoreError> {
        if !self.snapshot().rovers.contains(&rover) {
            return Err(CoreError::UnknownRover {
                name: rover.to_string(),
            });
        }
        self.inner
            .store
            .update(StatePatch::new().selected_rover(Some(rover)))?;
        info!(%rover, "rover selected");

        let (photos, manifest) = tokio::join!(self.load_photos(rover), self.load_manifest(rover));
        if let Err(e) = &manifest {
            warn!(%rover, error = %e, "manifest load failed");
        }
        photos
    }

    /// Like [`select_rover`](Self::select_rover), by wire name.
    pub async fn select_rover_named(&self, name: &str) -> Result<LoadOutcome, CoreError> {
        let rover: Rover = name.parse().map_err(|_| CoreError::UnknownRover {
            name: name.to_owned(),
        })?;
        self.select_rover(rover).await
    }

    /// Drop the cached value for `key` and load it again.
    pub async fn refresh(&self, key: ResourceKey) -> Result<LoadOutcome, CoreError> {
        self.invalidate(key);
        self.load(key).await
    }

    pub fn invalidate(&self, key: ResourceKey) -> bool {
        let cache_key = key.to_string();
        match key {
            ResourceKey::Apod => self.inner.apod.invalidate(&cache_key),
            ResourceKey::Photos(_) => self.inner.photos.invalidate(&cache_key),
            ResourceKey::Manifest(_) => self.inner.manifests.invalidate(&cache_key),
        }
    }

    pub fn cache_state(&self, key: ResourceKey) -> Option<EntryState> {
        let cache_key = key.to_string();
        match key {
            ResourceKey::Apod => self.inner.apod.peek(&cache_key),
            ResourceKey::Photos(_) => self.inner.photos.peek(&cache_key),
            ResourceKey::Manifest(_) => self.inner.manifests.peek(&cache_key),
        }
    }

    /// Satisfy one data need found after a render.
    pub async fn fulfil(&self, need: DataNeed) -> Result<LoadOutcome, CoreError> {
        if need.refresh {
            self.refresh(need.key).await
        } else {
            self.load(need.key).await
        }
    }

    /// Spawn one task per data need of `snapshot`. Must be called after
    /// the render for `snapshot` has returned, from within a tokio runtime.
    pub fn dispatch_needs(&self, snapshot: &Snapshot, today: NaiveDate) -> Vec<JoinHandle<()>> {
        view::data_needs(snapshot, today)
            .into_iter()
            .map(|need| {
                let dashboard = self.clone();
                tokio::spawn(async move {
                    debug!(key = %need.key, refresh = need.refresh, "dispatching data need");
                    if let Err(e) = dashboard.fulfil(need).await {
                        warn!(key = %need.key, error = %e, "data need failed");
                    }
                })
            })
            .collect()
    }

    // ── Shared load flow ─────────────────────────────────────────────

    async fn run<V, F, Fut, A>(
        &self,
        key: ResourceKey,
        cache: &FetchCache<V>,
        loader: F,
        apply: A,
    ) -> Result<LoadOutcome, CoreError>
    where
        V: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
        A: FnOnce(&DashboardState, V) -> StatePatch,
    {
        let store = &self.inner.store;
        let tracker = &self.inner.tracker;

        let ticket = tracker.issue(key);
        store.update_if(|s| {
            tracker
                .is_current(&ticket)
                .then(|| StatePatch::new().loading(s.loading_with(key)))
        })?;

        let result = cache.get(&key.to_string(), loader).await;

        // The ticket is re-checked under the store's update lock, so a newer
        // request for `key` cannot slip in between the check and the merge.
        match result {
            Ok(value) => {
                let merged = store.update_if(|s| {
                    tracker.is_current(&ticket).then(|| {
                        apply(s, value)
                            .loading(s.loading_without(key))
                            .errors(s.errors_without(key))
                    })
                })?;
                if merged.is_none() {
                    debug!(%key, seq = ticket.seq(), "discarding stale response");
                    return Ok(LoadOutcome::Stale);
                }
                debug!(%key, "load applied");
                Ok(LoadOutcome::Applied)
            }
            Err(error) => {
                let recorded = store.update_if(|s| {
                    tracker.is_current(&ticket).then(|| {
                        StatePatch::new()
                            .loading(s.loading_without(key))
                            .errors(s.errors_with(key, error.clone()))
                    })
                })?;
                if recorded.is_none() {
                    debug!(%key, seq = ticket.seq(), %error, "discarding stale failure");
                    return Ok(LoadOutcome::Stale);
                }
                warn!(%key, %error, "load failed");
                Err(error.into())
            }
        }
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("proxy", &self.inner.client.base_url().as_str())
            .field("store", &self.inner.store)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::new(&ClientConfig::default()).unwrap()
    }

    #[test]
    fn unusable_proxy_url_is_a_config_error() {
        let config = ClientConfig {
            proxy_url: url::Url::parse("mailto:ops@example.com").unwrap(),
            ..ClientConfig::default()
        };
        let err = Dashboard::new(&config).unwrap_err();
        assert!(
            matches!(err, CoreError::Config { ref message } if message.contains("mailto:")),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn superseded_failure_leaves_state_alone() {
        let dashboard = dashboard();
        let key = ResourceKey::Photos(Rover::Spirit);
        let inner = Arc::clone(&dashboard.inner);

        let outcome = dashboard
            .run(
                key,
                &dashboard.inner.photos,
                move || async move {
                    let newer = inner.tracker.issue(ResourceKey::Photos(Rover::Spirit));
                    assert!(inner.tracker.is_current(&newer));
                    Err(FetchError::HttpStatus { code: 502 })
                },
                |s, photos| StatePatch::new().photos(s.photos_with(Rover::Spirit, photos)),
            )
            .await
            .unwrap();

        assert_eq!(outcome, LoadOutcome::Stale);
        let snap = dashboard.snapshot();
        assert_eq!(snap.version(), 1);
        assert!(snap.errors.is_empty());
        assert!(snap.is_loading_key(key));
    }

    #[tokio::test]
    async fn superseded_value_is_not_merged() {
        let dashboard = dashboard();
        let key = ResourceKey::Manifest(Rover::Spirit);
        let inner = Arc::clone(&dashboard.inner);
        let manifest = Arc::new(Manifest {
            rover_name: "Spirit".into(),
            status: "complete".into(),
            launch_date: None,
            landing_date: None,
            max_sol: Some(2208),
            max_date: None,
            total_photos: Some(124_550),
        });

        let outcome = dashboard
            .run(
                key,
                &dashboard.inner.manifests,
                move || async move {
                    inner.tracker.issue(ResourceKey::Manifest(Rover::Spirit));
                    Ok(manifest)
                },
                |s, manifest| {
                    StatePatch::new().manifests(s.manifests_with(Rover::Spirit, manifest))
                },
            )
            .await
            .unwrap();

        assert_eq!(outcome, LoadOutcome::Stale);
        assert!(dashboard.snapshot().manifest_for(Rover::Spirit).is_none());
        assert_eq!(dashboard.snapshot().version(), 1);
    }
}
