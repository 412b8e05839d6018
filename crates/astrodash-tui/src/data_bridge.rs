//! Data bridge: the store's single subscriber, forwarding every snapshot
//! into the app's action channel.
//!
//! The subscriber runs synchronously inside `Store::update`, so it only
//! enqueues; drawing happens on the app loop.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use astrodash_core::Store;

use crate::action::Action;

/// Unsubscribes from the store when dropped.
pub struct DataBridge {
    store: Arc<Store>,
}

impl DataBridge {
    /// Subscribe to `store` and push the current snapshot right away, so the
    /// first frame has something to draw.
    pub fn connect(store: Arc<Store>, action_tx: UnboundedSender<Action>) -> Self {
        let _ = action_tx.send(Action::StateChanged(store.snapshot()));

        store.subscribe(move |snapshot| {
            let forwarded = action_tx.send(Action::StateChanged(snapshot.clone()));
            if forwarded.is_err() {
                debug!(version = snapshot.version(), "snapshot dropped");
            }
        });

        Self { store }
    }
}

impl Drop for DataBridge {
    fn drop(&mut self) {
        self.store.unsubscribe();
    }
}
