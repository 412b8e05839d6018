// ── Application state and partial updates ──

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::FetchError;
use crate::model::{Apod, Manifest, Photo, ResourceKey, Rover, User};

/// Name greeted when none is configured.
pub const DEFAULT_USER_NAME: &str = "Chris";

/// The entire application state at one instant.
///
/// Collections hold `Arc`ed payloads so that deriving the next state from
/// the previous one copies pointers, not photo lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub user: User,
    pub apod: Option<Arc<Apod>>,
    /// Local date on which the APOD was last fetched successfully.
    pub apod_checked_on: Option<NaiveDate>,
    pub rovers: Vec<Rover>,
    pub selected_rover: Option<Rover>,
    pub photos: BTreeMap<Rover, Arc<[Photo]>>,
    pub manifests: BTreeMap<Rover, Arc<Manifest>>,
    /// Resources with a request in flight.
    pub loading: BTreeSet<ResourceKey>,
    /// Last failure per resource, cleared by the next success.
    #[serde(serialize_with = "serialize_errors")]
    pub errors: BTreeMap<ResourceKey, FetchError>,
}

fn serialize_errors<S: serde::Serializer>(
    errors: &BTreeMap<ResourceKey, FetchError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(errors.iter().map(|(k, e)| (k.to_string(), e.to_string())))
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            user: User::new(DEFAULT_USER_NAME),
            apod: None,
            apod_checked_on: None,
            rovers: Rover::DEFAULT_ROSTER.to_vec(),
            selected_rover: None,
            photos: BTreeMap::new(),
            manifests: BTreeMap::new(),
            loading: BTreeSet::new(),
            errors: BTreeMap::new(),
        }
    }
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        !self.loading.is_empty()
    }

    pub fn is_loading_key(&self, key: ResourceKey) -> bool {
        self.loading.contains(&key)
    }

    pub fn error_for(&self, key: ResourceKey) -> Option<&FetchError> {
        self.errors.get(&key)
    }

    pub fn photos_for(&self, rover: Rover) -> Option<&Arc<[Photo]>> {
        self.photos.get(&rover)
    }

    pub fn manifest_for(&self, rover: Rover) -> Option<&Arc<Manifest>> {
        self.manifests.get(&rover)
    }

    /// Shallow merge: every field set in `patch` replaces the current one,
    /// every unset field is carried over.
    #[must_use]
    pub fn merge(&self, patch: StatePatch) -> Self {
        Self {
            user: patch.user.unwrap_or_else(|| self.user.clone()),
            apod: patch.apod.unwrap_or_else(|| self.apod.clone()),
            apod_checked_on: patch.apod_checked_on.unwrap_or(self.apod_checked_on),
            rovers: patch.rovers.unwrap_or_else(|| self.rovers.clone()),
            selected_rover: patch.selected_rover.unwrap_or(self.selected_rover),
            photos: patch.photos.unwrap_or_else(|| self.photos.clone()),
            manifests: patch.manifests.unwrap_or_else(|| self.manifests.clone()),
            loading: patch.loading.unwrap_or_else(|| self.loading.clone()),
            errors: patch.errors.unwrap_or_else(|| self.errors.clone()),
        }
    }

    // ── Derived collections for patches ──────────────────────────────

    pub fn loading_with(&self, key: ResourceKey) -> BTreeSet<ResourceKey> {
        let mut set = self.loading.clone();
        set.insert(key);
        set
    }

    pub fn loading_without(&self, key: ResourceKey) -> BTreeSet<ResourceKey> {
        let mut set = self.loading.clone();
        set.remove(&key);
        set
    }

    pub fn errors_with(
        &self,
        key: ResourceKey,
        err: FetchError,
    ) -> BTreeMap<ResourceKey, FetchError> {
        let mut map = self.errors.clone();
        map.insert(key, err);
        map
    }

    pub fn errors_without(&self, key: ResourceKey) -> BTreeMap<ResourceKey, FetchError> {
        let mut map = self.errors.clone();
        map.remove(&key);
        map
    }

    pub fn photos_with(&self, rover: Rover, photos: Arc<[Photo]>) -> BTreeMap<Rover, Arc<[Photo]>> {
        let mut map = self.photos.clone();
        map.insert(rover, photos);
        map
    }

    pub fn manifests_with(
        &self,
        rover: Rover,
        manifest: Arc<Manifest>,
    ) -> BTreeMap<Rover, Arc<Manifest>> {
        let mut map = self.manifests.clone();
        map.insert(rover, manifest);
        map
    }
}

/// A partial update. Unset fields leave the current value alone.
///
/// Optional state fields take `Option<Option<T>>` so a patch can clear
/// them (`Some(None)`) as well as leave them untouched (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub user: Option<User>,
    pub apod: Option<Option<Arc<Apod>>>,
    pub apod_checked_on: Option<Option<NaiveDate>>,
    pub rovers: Option<Vec<Rover>>,
    pub selected_rover: Option<Option<Rover>>,
    pub photos: Option<BTreeMap<Rover, Arc<[Photo]>>>,
    pub manifests: Option<BTreeMap<Rover, Arc<Manifest>>>,
    pub loading: Option<BTreeSet<ResourceKey>>,
    pub errors: Option<BTreeMap<ResourceKey, FetchError>>,
}

impl StatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn apod(mut self, apod: Option<Arc<Apod>>) -> Self {
        self.apod = Some(apod);
        self
    }

    pub fn apod_checked_on(mut self, date: Option<NaiveDate>) -> Self {
        self.apod_checked_on = Some(date);
        self
    }

    pub fn rovers(mut self, rovers: Vec<Rover>) -> Self {
        self.rovers = Some(rovers);
        self
    }

    pub fn selected_rover(mut self, rover: Option<Rover>) -> Self {
        self.selected_rover = Some(rover);
        self
    }

    pub fn photos(mut self, photos: BTreeMap<Rover, Arc<[Photo]>>) -> Self {
        self.photos = Some(photos);
        self
    }

    pub fn manifests(mut self, manifests: BTreeMap<Rover, Arc<Manifest>>) -> Self {
        self.manifests = Some(manifests);
        self
    }

    pub fn loading(mut self, loading: BTreeSet<ResourceKey>) -> Self {
        self.loading = Some(loading);
        self
    }

    pub fn errors(mut self, errors: BTreeMap<ResourceKey, FetchError>) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// One immutable version of the full application state.
///
/// Cheap to clone. `version` increases by one with every store update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    version: u64,
    state: Arc<DashboardState>,
}

impl Snapshot {
    pub(crate) fn new(version: u64, state: DashboardState) -> Self {
        Self {
            version,
            state: Arc::new(state),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }
}

impl Deref for Snapshot {
    type Target = DashboardState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}
