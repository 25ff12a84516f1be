//! Change notification for watched subtrees.
//!
//! Subscriptions are explicit handles owned by whoever needs the updates and
//! unregister themselves on drop, so a torn-down screen can never keep
//! receiving events. Delivery is per-subscriber and unordered across
//! subscribers; one subscriber sees its own events in commit order.

use campusnet_domain::TreePath;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// One committed change under a watched prefix
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// Path of the changed document
    pub path: TreePath,

    /// New payload, `None` when the document was removed
    pub value: Option<serde_json::Value>,

    /// Version after the change (the removed version for removals)
    pub version: u64,
}

struct Watcher {
    id: u64,
    prefix: TreePath,
    tx: UnboundedSender<ChangeEvent>,
}

/// Registry of active subscriptions
pub struct WatchHub {
    watchers: Mutex<Vec<Watcher>>,
    next_id: AtomicU64,
}

impl WatchHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self {
            watchers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a subscription for all changes under `prefix`
    pub fn watch(
        self: &Arc<Self>,
        prefix: TreePath,
    ) -> (WatchHandle, UnboundedReceiver<ChangeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.watchers
            .lock()
            .unwrap()
            .push(Watcher { id, prefix, tx });
        (
            WatchHandle {
                id,
                hub: Arc::clone(self),
            },
            rx,
        )
    }

    /// Deliver an event to every matching subscriber
    ///
    /// Subscribers whose receiver is gone are pruned here rather than
    /// erroring the publisher.
    pub(crate) fn publish(&self, event: &ChangeEvent) {
        let mut watchers = self.watchers.lock().unwrap();
        watchers.retain(|watcher| {
            if !watcher.prefix.contains(&event.path) {
                return true;
            }
            watcher.tx.send(event.clone()).is_ok()
        });
    }

    fn unregister(&self, id: u64) {
        self.watchers.lock().unwrap().retain(|w| w.id != id);
    }

    #[cfg(test)]
    fn watcher_count(&self) -> usize {
        self.watchers.lock().unwrap().len()
    }
}

impl Default for WatchHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle owning one subscription; dropping it unregisters
pub struct WatchHandle {
    id: u64,
    hub: Arc<WatchHub>,
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.hub.unregister(self.id);
    }
}
