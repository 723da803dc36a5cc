//! Per-consumer registry façade.
//!
//! An [`OwnerScope`] binds one owner id to a shared [`ShortcutManager`] so a
//! UI component can manage its own shortcuts without carrying the id around,
//! and guarantees the owner's registrations are removed when the component's
//! lifetime ends: dropping the scope clears them.

use std::sync::Arc;

use crate::manager::ShortcutManager;
use crate::registration::{ShortcutDef, ShortcutSnapshot};

/// Registry operations scoped to a single owner, with cleanup on drop.
///
/// The host's component-lifecycle integration is expected to hold the scope
/// for as long as the component lives; teardown happens exactly once, via
/// [`OwnerScope::release`] or `Drop`, whichever comes first.
pub struct OwnerScope {
    manager: Arc<ShortcutManager>,
    owner_id: String,
    released: bool,
}

impl OwnerScope {
    /// Bind an owner id to a shared manager.
    pub fn new(manager: Arc<ShortcutManager>, owner_id: impl Into<String>) -> Self {
        Self {
            manager,
            owner_id: owner_id.into(),
            released: false,
        }
    }

    /// The owner id this scope manages.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Register shortcuts for this owner; see [`ShortcutManager::register`].
    pub fn register(&self, defs: Vec<ShortcutDef>) -> Vec<String> {
        self.manager.register(&self.owner_id, defs)
    }

    /// Remove this owner's registrations bound to the given key texts.
    pub fn deregister(&self, key_texts: &[&str]) {
        self.manager.deregister(&self.owner_id, key_texts);
    }

    /// Enable this owner's registrations bound to the given key texts.
    pub fn enable(&self, key_texts: &[&str]) {
        self.manager.enable(&self.owner_id, key_texts);
    }

    /// Disable this owner's registrations bound to the given key texts.
    pub fn disable(&self, key_texts: &[&str]) {
        self.manager.disable(&self.owner_id, key_texts);
    }

    /// Remove all of this owner's registrations.
    pub fn clear(&self) {
        self.manager.clear(&self.owner_id);
    }

    /// Snapshots of this owner's registrations, in registration order.
    pub fn shortcuts(&self) -> Vec<ShortcutSnapshot> {
        self.manager.owner_shortcuts(&self.owner_id)
    }

    /// Canonical key texts of this owner's registrations.
    pub fn registered_keys(&self) -> Vec<String> {
        self.shortcuts().into_iter().map(|snap| snap.keys).collect()
    }

    /// Tear down now: clears the owner's registrations and disarms the
    /// drop-time cleanup. Idempotent.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.manager.clear(&self.owner_id);
        }
    }
}

impl Drop for OwnerScope {
    fn drop(&mut self) {
        self.release();
    }
}
