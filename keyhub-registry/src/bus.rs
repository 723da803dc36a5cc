//! Registry change notification.
//!
//! A synchronous observer set: display panels and other interested parties
//! subscribe and are told what kind of change happened and for which owner.
//! Events carry no shortcut payload; observers re-query the registry's
//! snapshot accessors.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

/// Identifies one bus subscription, for [`EventBus::unsubscribe`].
pub type SubscriberId = u64;

/// The kind of registry mutation an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryEventKind {
    /// Shortcuts were added.
    Register,
    /// Shortcuts were removed by key.
    Deregister,
    /// Shortcuts were enabled.
    Enable,
    /// Shortcuts were disabled.
    Disable,
    /// An owner's whole list was removed.
    Clear,
}

/// A registry change notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryEvent {
    /// What happened.
    pub kind: RegistryEventKind,
    /// The owner the mutation addressed.
    pub owner_id: String,
    /// Canonical texts of the combinations named by the mutation, when the
    /// operation addressed specific keys (`None` for clear).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

type Listener = Arc<dyn Fn(&RegistryEvent) + Send + Sync + 'static>;

#[derive(Default)]
struct BusInner {
    next_id: SubscriberId,
    subscribers: Vec<(SubscriberId, Listener)>,
}

/// Synchronous observer set over registry changes.
///
/// Listeners run in subscription order on the emitting thread. A panicking
/// listener propagates to the emitter; the bus deliberately does not isolate
/// listener failures.
#[derive(Default)]
pub struct EventBus {
    inner: Mutex<BusInner>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener; returns the id to pass to [`EventBus::unsubscribe`].
    pub fn subscribe(&self, listener: impl Fn(&RegistryEvent) + Send + Sync + 'static) -> SubscriberId {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        inner.subscribers.len() != before
    }

    /// Invoke every current subscriber with the event, in subscription order.
    ///
    /// The subscriber list is copied before invoking so a listener may
    /// subscribe or unsubscribe from inside its own notification; such
    /// changes take effect from the next emit.
    pub fn emit(&self, event: &RegistryEvent) {
        let listeners: Vec<Listener> = self
            .inner
            .lock()
            .subscribers
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}
