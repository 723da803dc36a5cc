//! Shortcut registration types.
//!
//! [`ShortcutDef`] is what consumers hand to the registry; the registry turns
//! it into a [`ShortcutRegistration`] with a fresh id and owns it from then
//! on. [`ShortcutSnapshot`] is the serializable read-model handed back out to
//! display panels and other observers.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use keyhub_combo::{KeyCombo, KeyInput};
use serde::Serialize;
use uuid::Uuid;

/// Callback invoked when a registered shortcut matches a key event.
///
/// Opaque to the registry; shared so dispatch snapshots can hold it without
/// cloning the closure itself.
pub type ShortcutCallback = Arc<dyn Fn(&KeyInput) + Send + Sync + 'static>;

/// A shortcut definition supplied at registration time.
///
/// Built with [`ShortcutDef::new`] and builder-style setters; everything but
/// the keys and callback has a default (`enabled` true, `prevent_default`
/// true, `stop_propagation` false, empty description).
#[derive(Clone)]
pub struct ShortcutDef {
    pub(crate) keys: KeyCombo,
    pub(crate) callback: ShortcutCallback,
    pub(crate) description: String,
    pub(crate) enabled: bool,
    pub(crate) prevent_default: bool,
    pub(crate) stop_propagation: bool,
}

impl ShortcutDef {
    /// Define a shortcut from a key combination string.
    ///
    /// The text is parsed leniently; malformed text produces a registration
    /// that never matches rather than an error.
    pub fn new(keys: &str, callback: impl Fn(&KeyInput) + Send + Sync + 'static) -> Self {
        Self::from_combo(KeyCombo::parse(keys), callback)
    }

    /// Define a shortcut from an already-built combination.
    pub fn from_combo(keys: KeyCombo, callback: impl Fn(&KeyInput) + Send + Sync + 'static) -> Self {
        Self {
            keys,
            callback: Arc::new(callback),
            description: String::new(),
            enabled: true,
            prevent_default: true,
            stop_propagation: false,
        }
    }

    /// Human-readable description shown in shortcut listings.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Whether the shortcut starts enabled (default true).
    pub fn enabled(mut self, on: bool) -> Self {
        self.enabled = on;
        self
    }

    /// Whether a match suppresses the platform's default handling
    /// (default true).
    pub fn prevent_default(mut self, on: bool) -> Self {
        self.prevent_default = on;
        self
    }

    /// Whether a match stops the event from propagating further
    /// (default false).
    pub fn stop_propagation(mut self, on: bool) -> Self {
        self.stop_propagation = on;
        self
    }
}

impl fmt::Debug for ShortcutDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutDef")
            .field("keys", &self.keys.to_string())
            .field("description", &self.description)
            .field("enabled", &self.enabled)
            .field("prevent_default", &self.prevent_default)
            .field("stop_propagation", &self.stop_propagation)
            .finish_non_exhaustive()
    }
}

/// One registered shortcut, owned by the registry.
///
/// The id is globally unique and immutable; `enabled` is the only field that
/// changes after creation.
#[derive(Clone)]
pub(crate) struct ShortcutRegistration {
    pub(crate) id: String,
    pub(crate) owner_id: String,
    pub(crate) keys: KeyCombo,
    pub(crate) callback: ShortcutCallback,
    pub(crate) description: String,
    pub(crate) enabled: bool,
    pub(crate) prevent_default: bool,
    pub(crate) stop_propagation: bool,
    pub(crate) registered_at: DateTime<Utc>,
}

impl ShortcutRegistration {
    pub(crate) fn new(owner_id: &str, def: ShortcutDef) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            keys: def.keys,
            callback: def.callback,
            description: def.description,
            enabled: def.enabled,
            prevent_default: def.prevent_default,
            stop_propagation: def.stop_propagation,
            registered_at: Utc::now(),
        }
    }

    pub(crate) fn snapshot(&self) -> ShortcutSnapshot {
        ShortcutSnapshot {
            id: self.id.clone(),
            owner_id: self.owner_id.clone(),
            keys: self.keys.to_string(),
            description: self.description.clone(),
            enabled: self.enabled,
            prevent_default: self.prevent_default,
            stop_propagation: self.stop_propagation,
            registered_at: self.registered_at,
        }
    }
}

impl fmt::Debug for ShortcutRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutRegistration")
            .field("id", &self.id)
            .field("owner_id", &self.owner_id)
            .field("keys", &self.keys.to_string())
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Serializable point-in-time view of one registration.
///
/// `keys` carries the canonical display text of the combination. Returned by
/// the registry's read accessors; mutating a snapshot has no effect on the
/// registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortcutSnapshot {
    /// Unique registration id.
    pub id: String,
    /// Owner the registration belongs to.
    pub owner_id: String,
    /// Canonical key combination text, e.g. "Ctrl+Shift+S".
    pub keys: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the shortcut currently fires.
    pub enabled: bool,
    /// Whether a match suppresses default handling.
    pub prevent_default: bool,
    /// Whether a match stops propagation.
    pub stop_propagation: bool,
    /// When the shortcut was registered.
    pub registered_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_def_defaults() {
        let def = ShortcutDef::new("Ctrl+S", |_| {});
        assert!(def.enabled);
        assert!(def.prevent_default);
        assert!(!def.stop_propagation);
        assert!(def.description.is_empty());
    }

    #[test]
    fn test_def_builders_override_defaults() {
        let def = ShortcutDef::new("Ctrl+S", |_| {})
            .description("save")
            .enabled(false)
            .prevent_default(false)
            .stop_propagation(true);
        assert_eq!(def.description, "save");
        assert!(!def.enabled);
        assert!(!def.prevent_default);
        assert!(def.stop_propagation);
    }

    #[test]
    fn test_registrations_get_unique_ids() {
        let a = ShortcutRegistration::new("owner", ShortcutDef::new("Ctrl+A", |_| {}));
        let b = ShortcutRegistration::new("owner", ShortcutDef::new("Ctrl+A", |_| {}));
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn test_snapshot_carries_canonical_keys() {
        let reg = ShortcutRegistration::new("editor", ShortcutDef::new("control+shift+z", |_| {}));
        let snap = reg.snapshot();
        assert_eq!(snap.keys, "Ctrl+Shift+Z");
        assert_eq!(snap.owner_id, "editor");
        assert_eq!(snap.id, reg.id);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let reg = ShortcutRegistration::new("editor", ShortcutDef::new("Ctrl+S", |_| {}).description("save"));
        let json = serde_json::to_value(reg.snapshot()).unwrap();
        assert_eq!(json["keys"], "Ctrl+S");
        assert_eq!(json["description"], "save");
        assert_eq!(json["enabled"], true);
    }
}
