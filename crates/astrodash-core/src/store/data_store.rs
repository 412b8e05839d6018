// ── Store ──
//
// Lock-free reads of the current snapshot via `ArcSwap`; writes are
// serialized by `write_lock` and notify the render subscriber while it is
// still held, so renders observe versions in order.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, ThreadId};

use arc_swap::ArcSwap;
use tracing::{debug, trace};

use super::state::{DashboardState, Snapshot, StatePatch};
use crate::error::CoreError;

/// Render callback. Runs synchronously on the updating thread.
pub type RenderFn = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// Owned application state container with a single subscriber.
pub struct Store {
    current: ArcSwap<Snapshot>,
    write_lock: Mutex<()>,
    subscriber: Mutex<Option<RenderFn>>,
    /// Thread currently running the render callback, if any.
    rendering: Mutex<Option<ThreadId>>,
}

impl Store {
    pub fn new(initial: DashboardState) -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot::new(0, initial)),
            write_lock: Mutex::new(()),
            subscriber: Mutex::new(None),
            rendering: Mutex::new(None),
        }
    }

    /// The current snapshot, reflecting every update that has returned.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::clone(&self.current.load())
    }

    /// Register the render callback, replacing any previous one.
    pub fn subscribe<F>(&self, render: F)
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        *self
            .subscriber
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(render));
    }

    pub fn unsubscribe(&self) {
        self.subscriber
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Shallow-merge `patch` into the current state and render once.
    pub fn update(&self, patch: StatePatch) -> Result<Snapshot, CoreError> {
        self.update_with(move |_| patch)
    }

    /// Like [`update`](Self::update), but derives the patch from the state
    /// current at the moment the update lock is taken.
    pub fn update_with<F>(&self, f: F) -> Result<Snapshot, CoreError>
    where
        F: FnOnce(&DashboardState) -> StatePatch,
    {
        let applied = self.update_if(|s| Some(f(s)))?;
        Ok(applied.unwrap_or_else(|| self.snapshot()))
    }

    /// Conditional update: `f` runs under the update lock and may return
    /// `None` to leave the store untouched, in which case no version is
    /// consumed and nothing is rendered.
    pub fn update_if<F>(&self, f: F) -> Result<Option<Snapshot>, CoreError>
    where
        F: FnOnce(&DashboardState) -> Option<StatePatch>,
    {
        if self.is_rendering_here() {
            debug!("rejecting store update from inside render callback");
            return Err(CoreError::ReentrantUpdate);
        }

        let _write = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let prev = self.current.load_full();
        let Some(patch) = f(prev.state()) else {
            trace!(version = prev.version(), "store update skipped");
            return Ok(None);
        };
        let next = Snapshot::new(prev.version() + 1, prev.state().merge(patch));
        self.current.store(Arc::new(next.clone()));
        trace!(version = next.version(), "store updated");

        self.notify(&next);
        Ok(Some(next))
    }

    fn notify(&self, snapshot: &Snapshot) {
        let subscriber = self
            .subscriber
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let Some(render) = subscriber else {
            return;
        };

        let _guard = RenderGuard::enter(&self.rendering);
        render(snapshot);
    }

    fn is_rendering_here(&self) -> bool {
        *self
            .rendering
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            == Some(thread::current().id())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DashboardState::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("version", &self.current.load().version())
            .finish_non_exhaustive()
    }
}

/// Marks the current thread as rendering until dropped, so a panicking
/// callback does not leave the store locked out.
struct RenderGuard<'a> {
    slot: &'a Mutex<Option<ThreadId>>,
}

impl<'a> RenderGuard<'a> {
    fn enter(slot: &'a Mutex<Option<ThreadId>>) -> Self {
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(thread::current().id());
        Self { slot }
    }
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
