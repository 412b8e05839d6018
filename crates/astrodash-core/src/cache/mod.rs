// ── Fetch cache ──
//
// One entry per resource key. A `Pending` entry holds the shared
// in-flight future every concurrent caller awaits; the future settles its
// own entry on completion, but only if that entry is still the `Pending`
// of the same generation (an `invalidate` in between wins).

mod tracker;

pub use tracker::{RequestTracker, Ticket};

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use serde::Serialize;
use tracing::debug;

use crate::error::FetchError;

type SharedLoad<V> = Shared<BoxFuture<'static, Result<V, FetchError>>>;

enum CacheEntry<V> {
    Pending {
        generation: u64,
        future: SharedLoad<V>,
    },
    Resolved {
        value: V,
        retrieved_at: DateTime<Utc>,
    },
    Failed {
        error: FetchError,
        retrieved_at: DateTime<Utc>,
    },
}

/// Inspection view of a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EntryState {
    Pending,
    Resolved { retrieved_at: DateTime<Utc> },
    Failed {
        error: String,
        retrieved_at: DateTime<Utc>,
    },
}

enum Lookup<V> {
    Hit(V),
    Join(SharedLoad<V>),
    Start(SharedLoad<V>),
}

/// Keyed cache of remote resources with request coalescing.
///
/// Resolved values are served until invalidated. Failures are kept for
/// [`peek`](Self::peek) but do not satisfy [`get`](Self::get); the next
/// call loads again.
pub struct FetchCache<V> {
    entries: Arc<DashMap<String, CacheEntry<V>>>,
    next_generation: AtomicU64,
}

impl<V> FetchCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, join an in-flight load, or
    /// start a new one with `loader`.
    ///
    /// `loader` is only called when neither a resolved value nor an
    /// in-flight load exists.
    pub async fn get<F, Fut>(&self, key: &str, loader: F) -> Result<V, FetchError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let lookup = match self.entries.entry(key.to_owned()) {
            Entry::Occupied(mut occupied) => {
                let existing = match occupied.get() {
                    CacheEntry::Resolved { value, .. } => Some(Lookup::Hit(value.clone())),
                    CacheEntry::Pending { future, .. } => Some(Lookup::Join(future.clone())),
                    CacheEntry::Failed { .. } => None,
                };
                if let Some(lookup) = existing {
                    lookup
                } else {
                    let (generation, future) = self.start(key, loader);
                    occupied.insert(CacheEntry::Pending {
                        generation,
                        future: future.clone(),
                    });
                    Lookup::Start(future)
                }
            }
            Entry::Vacant(vacant) => {
                let (generation, future) = self.start(key, loader);
                vacant.insert(CacheEntry::Pending {
                    generation,
                    future: future.clone(),
                });
                Lookup::Start(future)
            }
        };

        match lookup {
            Lookup::Hit(value) => {
                debug!(key, "cache hit");
                Ok(value)
            }
            Lookup::Join(future) => {
                debug!(key, "joining in-flight request");
                future.await
            }
            Lookup::Start(future) => {
                debug!(key, "cache miss, loading");
                future.await
            }
        }
    }

    fn start<F, Fut>(&self, key: &str, loader: F) -> (u64, SharedLoad<V>)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let entries = Arc::downgrade(&self.entries);
        let key = key.to_owned();

        let future = async move {
            let result = loader().await;
            settle(&entries, &key, generation, &result);
            result
        }
        .boxed()
        .shared();

        (generation, future)
    }

    /// Drop the entry for `key`. Returns `true` if there was one.
    ///
    /// A load in flight for `key` still completes for its callers but no
    /// longer writes into the cache.
    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            debug!(key, "cache entry invalidated");
        }
        removed
    }

    pub fn peek(&self, key: &str) -> Option<EntryState> {
        self.entries.get(key).map(|entry| match &*entry {
            CacheEntry::Pending { .. } => EntryState::Pending,
            CacheEntry::Resolved { retrieved_at, .. } => EntryState::Resolved {
                retrieved_at: *retrieved_at,
            },
            CacheEntry::Failed {
                error,
                retrieved_at,
            } => EntryState::Failed {
                error: error.to_string(),
                retrieved_at: *retrieved_at,
            },
        })
    }

    /// The resolved value for `key`, without loading.
    pub fn cached(&self, key: &str) -> Option<V> {
        self.entries.get(key).and_then(|entry| match &*entry {
            CacheEntry::Resolved { value, .. } => Some(value.clone()),
            _ => None,
        })
    }

    pub fn is_resolved(&self, key: &str) -> bool {
        matches!(self.peek(key), Some(EntryState::Resolved { .. }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl<V> Default for FetchCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for FetchCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCache")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

fn settle<V: Clone>(
    entries: &Weak<DashMap<String, CacheEntry<V>>>,
    key: &str,
    generation: u64,
    result: &Result<V, FetchError>,
) {
    let Some(entries) = entries.upgrade() else {
        return;
    };
    let Some(mut entry) = entries.get_mut(key) else {
        debug!(key, "load finished after invalidation, not caching");
        return;
    };
    if !matches!(&*entry, CacheEntry::Pending { generation: g, .. } if *g == generation) {
        debug!(key, "load superseded, not caching");
        return;
    }

    let retrieved_at = Utc::now();
    *entry = match result {
        Ok(value) => CacheEntry::Resolved {
            value: value.clone(),
            retrieved_at,
        },
        Err(error) => {
            debug!(key, %error, "load failed");
            CacheEntry::Failed {
                error: error.clone(),
                retrieved_at,
            }
        }
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use tokio::sync::oneshot;

    use super::*;

    fn counted<T: Send + 'static>(
        calls: &Arc<AtomicUsize>,
        result: Result<T, FetchError>,
    ) -> impl FnOnce() -> futures_util::future::Ready<Result<T, FetchError>> + Send + 'static
    {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            futures_util::future::ready(result)
        }
    }

    #[tokio::test]
    async fn concurrent_gets_share_one_load() {
        let cache = FetchCache::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel::<u32>();

        let first_calls = Arc::clone(&calls);
        let first = cache.get("rovers/curiosity", move || async move {
            first_calls.fetch_add(1, Ordering::SeqCst);
            Ok(rx.await.unwrap())
        });
        let second = cache.get("rovers/curiosity", counted(&calls, Ok(0)));
        let release = async {
            tokio::task::yield_now().await;
            tx.send(7).unwrap();
        };

        let (a, b, ()) = tokio::join!(first, second, release);

        assert_eq!(a.unwrap(), 7);
        assert_eq!(b.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_resolved("rovers/curiosity"));
    }

    #[tokio::test]
    async fn failure_is_retried_on_next_get() {
        let cache = FetchCache::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let err = cache
            .get("apod", counted(&calls, Err(FetchError::decode("bad"))))
            .await;
        assert!(err.is_err());
        assert!(matches!(cache.peek("apod"), Some(EntryState::Failed { .. })));

        let ok = cache.get("apod", counted(&calls, Ok(3))).await;
        assert_eq!(ok.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn resolved_value_is_served_without_loading() {
        let cache = FetchCache::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache.get("apod", counted(&calls, Ok(1))).await.unwrap();
        let again = cache.get("apod", counted(&calls, Ok(2))).await.unwrap();

        assert_eq!(again, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.cached("apod"), Some(1));
    }

    #[tokio::test]
    async fn server_error_leaves_no_resolved_entry() {
        let cache = FetchCache::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let result = cache
            .get(
                "rovers/spirit",
                counted(&calls, Err(FetchError::HttpStatus { code: 500 })),
            )
            .await;

        assert_eq!(result, Err(FetchError::HttpStatus { code: 500 }));
        assert!(!cache.is_resolved("rovers/spirit"));
        assert_eq!(cache.cached("rovers/spirit"), None);
    }

    #[tokio::test]
    async fn invalidated_load_does_not_overwrite_newer_value() {
        let cache = FetchCache::<u32>::new();
        let (tx, rx) = oneshot::channel::<u32>();

        let slow = cache.get("rovers/curiosity", move || async move { Ok(rx.await.unwrap()) });
        let newer = async {
            tokio::task::yield_now().await;
            assert!(cache.invalidate("rovers/curiosity"));
            let fresh = cache
                .get("rovers/curiosity", || async { Ok(2) })
                .await
                .unwrap();
            tx.send(1).unwrap();
            fresh
        };

        let (slow, fresh) = tokio::join!(slow, newer);

        assert_eq!(slow.unwrap(), 1);
        assert_eq!(fresh, 2);
        assert_eq!(cache.cached("rovers/curiosity"), Some(2));
    }

    #[tokio::test]
    async fn clear_and_len() {
        let cache = FetchCache::<u32>::new();
        cache.get("a", || async { Ok(1) }).await.unwrap();
        cache.get("b", || async { Ok(2) }).await.unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.peek("a"), None);
    }
}
