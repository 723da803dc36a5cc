//! The shortcut manager: registry operations, listening lifecycle, dispatch.
//!
//! One [`ShortcutManager`] instance coordinates all shortcuts in a process.
//! It is constructed by the application's composition root and shared via
//! `Arc`; there is no implicit global instance. Tests construct a fresh
//! manager instead of resetting shared state.

use std::sync::Arc;

use keyhub_combo::{KeyCombo, KeyInput, matcher};
use parking_lot::{Mutex, RwLock};

use crate::bus::{EventBus, RegistryEvent, RegistryEventKind, SubscriberId};
use crate::registration::{ShortcutDef, ShortcutRegistration, ShortcutSnapshot};
use crate::registry::RegistryState;

/// Host-side hook onto the platform's raw key event stream.
///
/// The manager keeps exactly one logical subscription to the stream: it
/// calls [`StreamHook::on_subscribe`] when the first shortcut appears in an
/// empty registry and [`StreamHook::on_unsubscribe`] when the last one is
/// removed. The host wires these to its actual event source and feeds events
/// to [`ShortcutManager::dispatch`] while subscribed.
pub trait StreamHook: Send + Sync {
    /// The registry became non-empty; start delivering key events.
    fn on_subscribe(&self);
    /// The registry became empty; stop delivering key events.
    fn on_unsubscribe(&self);
}

#[derive(Default)]
struct StreamState {
    listening: bool,
    hook: Option<Arc<dyn StreamHook>>,
}

/// Process-wide shortcut registry and dispatcher.
///
/// All operations are synchronous and complete within the call; mutations
/// are addressed by owner id and notified on the event bus. Dispatch runs on
/// one logical thread at a time, but callbacks may re-enter the manager
/// (register, deregister, clear) freely: each dispatch pass iterates a
/// snapshot taken before any callback runs, and no lock is held while
/// callbacks execute.
#[derive(Default)]
pub struct ShortcutManager {
    state: RwLock<RegistryState>,
    bus: EventBus,
    stream: Mutex<StreamState>,
}

impl ShortcutManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the host's stream hook.
    ///
    /// If the registry is already non-empty (hence logically subscribed),
    /// the hook's `on_subscribe` is invoked immediately so the host starts
    /// delivering events.
    pub fn set_stream_hook(&self, hook: impl StreamHook + 'static) {
        let hook: Arc<dyn StreamHook> = Arc::new(hook);
        let already_listening = {
            let mut stream = self.stream.lock();
            stream.hook = Some(Arc::clone(&hook));
            stream.listening
        };
        if already_listening {
            hook.on_subscribe();
        }
    }

    /// Whether the manager is currently subscribed to the key event stream.
    /// True iff at least one shortcut is registered.
    pub fn is_listening(&self) -> bool {
        self.stream.lock().listening
    }

    /// Register shortcuts for an owner; returns the generated registration
    /// ids in input order.
    ///
    /// The owner's list is created on its first registration. Definitions
    /// with an empty key are accepted but can never fire; they are logged as
    /// a warning rather than rejected.
    pub fn register(&self, owner_id: &str, defs: Vec<ShortcutDef>) -> Vec<String> {
        let mut ids = Vec::with_capacity(defs.len());
        let mut keys = Vec::with_capacity(defs.len());
        {
            let mut state = self.state.write();
            for def in defs {
                if def.keys.key.is_empty() {
                    log::warn!(
                        "Shortcut '{}' for owner '{}' has no key and will never fire",
                        def.keys,
                        owner_id
                    );
                }
                let registration = ShortcutRegistration::new(owner_id, def);
                ids.push(registration.id.clone());
                keys.push(registration.keys.to_string());
                state.insert(registration);
            }
        }
        log::debug!("Registered {} shortcut(s) for owner '{}'", ids.len(), owner_id);
        self.sync_listening();
        self.emit(RegistryEventKind::Register, owner_id, Some(keys));
        ids
    }

    /// Remove every registration of `owner_id` bound to any of the given key
    /// texts (compared canonically, so "ctrl+s" deregisters "Control+S").
    ///
    /// Unknown owners are a no-op; the deregister event is emitted either
    /// way.
    pub fn deregister(&self, owner_id: &str, key_texts: &[&str]) {
        let combos = parse_all(key_texts);
        let removed = self.state.write().remove_matching(owner_id, &combos);
        log::debug!("Deregistered {} shortcut(s) for owner '{}'", removed, owner_id);
        self.sync_listening();
        self.emit(RegistryEventKind::Deregister, owner_id, Some(texts_of(&combos)));
    }

    /// Enable the owner's registrations bound to the given key texts.
    pub fn enable(&self, owner_id: &str, key_texts: &[&str]) {
        self.set_enabled(owner_id, key_texts, true, RegistryEventKind::Enable);
    }

    /// Disable the owner's registrations bound to the given key texts.
    /// Disabled shortcuts stay registered and keep their position.
    pub fn disable(&self, owner_id: &str, key_texts: &[&str]) {
        self.set_enabled(owner_id, key_texts, false, RegistryEventKind::Disable);
    }

    /// Remove an owner's entire list unconditionally. Unknown owners are a
    /// no-op; the clear event is emitted either way.
    pub fn clear(&self, owner_id: &str) {
        let removed = self.state.write().clear_owner(owner_id);
        log::debug!("Cleared {} shortcut(s) for owner '{}'", removed, owner_id);
        self.sync_listening();
        self.emit(RegistryEventKind::Clear, owner_id, None);
    }

    /// Stop listening and drop all registrations: a whole-instance reset.
    /// The installed stream hook and bus subscribers are kept.
    pub fn destroy(&self) {
        self.state.write().clear_all();
        self.sync_listening();
        log::debug!("Shortcut registry destroyed");
    }

    /// Route one raw key event to every enabled, matching, unsuppressed
    /// registration; returns how many callbacks were invoked.
    ///
    /// Matches fire in registration order: owners in first-registration
    /// order, and within an owner, insertion order. Every match fires; there
    /// is no early termination, so two registrations bound to the same
    /// combination both run. Each match applies its prevent-default /
    /// stop-propagation options to the event before its callback runs.
    pub fn dispatch(&self, event: &KeyInput) -> usize {
        let snapshot = self.state.read().dispatch_snapshot();
        let mut invoked = 0;
        for registration in &snapshot {
            if !matcher::matches_with_suppression(event, &registration.keys) {
                continue;
            }
            if registration.prevent_default {
                event.prevent_default();
            }
            if registration.stop_propagation {
                event.stop_propagation();
            }
            (registration.callback)(event);
            invoked += 1;
        }
        if invoked > 0 {
            log::debug!("Key event '{}' matched {} shortcut(s)", event.key(), invoked);
        }
        invoked
    }

    /// Snapshots of one owner's registrations, in registration order.
    pub fn owner_shortcuts(&self, owner_id: &str) -> Vec<ShortcutSnapshot> {
        self.state.read().snapshot_owner(owner_id)
    }

    /// Snapshots of every owner's registrations. The returned copy is
    /// detached; mutating it has no effect on the registry.
    pub fn all_shortcuts(&self) -> Vec<(String, Vec<ShortcutSnapshot>)> {
        self.state.read().snapshot_all()
    }

    /// Ids of owners that currently have registrations.
    pub fn owner_ids(&self) -> Vec<String> {
        self.state.read().owner_ids()
    }

    /// Whether an owner currently has registrations.
    pub fn has_owner(&self, owner_id: &str) -> bool {
        self.state.read().has_owner(owner_id)
    }

    /// Total number of registrations across all owners.
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    /// Whether no shortcuts are registered.
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Subscribe to registry change events; see [`EventBus::subscribe`].
    pub fn subscribe(
        &self,
        listener: impl Fn(&RegistryEvent) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.bus.subscribe(listener)
    }

    /// Remove a change-event subscription.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.bus.unsubscribe(id)
    }

    fn set_enabled(&self, owner_id: &str, key_texts: &[&str], enabled: bool, kind: RegistryEventKind) {
        let combos = parse_all(key_texts);
        let changed = self.state.write().set_enabled(owner_id, &combos, enabled);
        log::debug!(
            "{} {} shortcut(s) for owner '{}'",
            if enabled { "Enabled" } else { "Disabled" },
            changed,
            owner_id
        );
        self.emit(kind, owner_id, Some(texts_of(&combos)));
    }

    fn emit(&self, kind: RegistryEventKind, owner_id: &str, keys: Option<Vec<String>>) {
        self.bus.emit(&RegistryEvent {
            kind,
            owner_id: owner_id.to_string(),
            keys,
        });
    }

    /// Reconcile the listening flag with registry emptiness, notifying the
    /// hook on a transition. The hook is invoked with no locks held: it may
    /// re-enter the manager.
    fn sync_listening(&self) {
        let should_listen = !self.state.read().is_empty();
        let transition = {
            let mut stream = self.stream.lock();
            if stream.listening == should_listen {
                None
            } else {
                stream.listening = should_listen;
                Some(stream.hook.clone())
            }
        };
        let Some(hook) = transition else {
            return;
        };
        if should_listen {
            log::info!("First shortcut registered, subscribing to the key event stream");
        } else {
            log::info!("Registry empty, unsubscribing from the key event stream");
        }
        if let Some(hook) = hook {
            if should_listen {
                hook.on_subscribe();
            } else {
                hook.on_unsubscribe();
            }
        }
    }
}

impl Drop for ShortcutManager {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn parse_all(key_texts: &[&str]) -> Vec<KeyCombo> {
    key_texts.iter().map(|text| KeyCombo::parse(text)).collect()
}

fn texts_of(combos: &[KeyCombo]) -> Vec<String> {
    combos.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyhub_combo::TargetKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_def(keys: &str, counter: &Arc<AtomicUsize>) -> ShortcutDef {
        let counter = Arc::clone(counter);
        ShortcutDef::new(keys, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[derive(Default)]
    struct CountingHook {
        subscribes: AtomicUsize,
        unsubscribes: AtomicUsize,
    }

    impl StreamHook for Arc<CountingHook> {
        fn on_subscribe(&self) {
            self.subscribes.fetch_add(1, Ordering::SeqCst);
        }
        fn on_unsubscribe(&self) {
            self.unsubscribes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_register_returns_ids_in_input_order() {
        let manager = ShortcutManager::new();
        let ids = manager.register(
            "editor",
            vec![ShortcutDef::new("Ctrl+A", |_| {}), ShortcutDef::new("Ctrl+B", |_| {})],
        );
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);

        let snaps = manager.owner_shortcuts("editor");
        assert_eq!(snaps[0].id, ids[0]);
        assert_eq!(snaps[1].id, ids[1]);
    }

    #[test]
    fn test_dispatch_invokes_matching_callback_and_prevents_default() {
        let manager = ShortcutManager::new();
        let count = Arc::new(AtomicUsize::new(0));
        manager.register("editor", vec![counting_def("Ctrl+Z", &count)]);

        let event = KeyInput::new("z").with_ctrl(true);
        assert_eq!(manager.dispatch(&event), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(event.default_prevented());
        assert!(!event.propagation_stopped());
    }

    #[test]
    fn test_dispatch_options_are_honored() {
        let manager = ShortcutManager::new();
        manager.register(
            "viewer",
            vec![
                ShortcutDef::new("Ctrl+D", |_| {})
                    .prevent_default(false)
                    .stop_propagation(true),
            ],
        );

        let event = KeyInput::new("d").with_ctrl(true);
        assert_eq!(manager.dispatch(&event), 1);
        assert!(!event.default_prevented());
        assert!(event.propagation_stopped());
    }

    #[test]
    fn test_dispatch_skips_disabled_registrations() {
        let manager = ShortcutManager::new();
        let count = Arc::new(AtomicUsize::new(0));
        manager.register("editor", vec![counting_def("Ctrl+Z", &count)]);

        manager.disable("editor", &["Ctrl+Z"]);
        assert_eq!(manager.dispatch(&KeyInput::new("z").with_ctrl(true)), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        manager.enable("editor", &["ctrl+z"]);
        assert_eq!(manager.dispatch(&KeyInput::new("z").with_ctrl(true)), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_all_matches_fire_across_owners_in_registration_order() {
        let manager = ShortcutManager::new();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        for owner in ["first", "second"] {
            let order = Arc::clone(&order);
            manager.register(
                owner,
                vec![ShortcutDef::new("Ctrl+K", move |_| order.lock().push(owner))],
            );
        }

        assert_eq!(manager.dispatch(&KeyInput::new("k").with_ctrl(true)), 2);
        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_listening_follows_registry_emptiness() {
        let manager = ShortcutManager::new();
        let hook = Arc::new(CountingHook::default());
        manager.set_stream_hook(Arc::clone(&hook));
        assert!(!manager.is_listening());

        manager.register("a", vec![ShortcutDef::new("Ctrl+A", |_| {})]);
        manager.register("b", vec![ShortcutDef::new("Ctrl+B", |_| {})]);
        assert!(manager.is_listening());
        assert_eq!(hook.subscribes.load(Ordering::SeqCst), 1);

        manager.deregister("a", &["Ctrl+A"]);
        assert!(manager.is_listening());
        manager.clear("b");
        assert!(!manager.is_listening());
        assert_eq!(hook.unsubscribes.load(Ordering::SeqCst), 1);

        // Re-registering re-subscribes.
        manager.register("c", vec![ShortcutDef::new("Ctrl+C", |_| {})]);
        assert_eq!(hook.subscribes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_hook_installed_late_is_told_about_active_subscription() {
        let manager = ShortcutManager::new();
        manager.register("editor", vec![ShortcutDef::new("Ctrl+S", |_| {})]);

        let hook = Arc::new(CountingHook::default());
        manager.set_stream_hook(Arc::clone(&hook));
        assert_eq!(hook.subscribes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_destroy_resets_everything() {
        let manager = ShortcutManager::new();
        let hook = Arc::new(CountingHook::default());
        manager.set_stream_hook(Arc::clone(&hook));
        manager.register("a", vec![ShortcutDef::new("Ctrl+A", |_| {})]);

        manager.destroy();
        assert!(manager.is_empty());
        assert!(!manager.is_listening());
        assert_eq!(hook.unsubscribes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_owner_mutations_still_emit_events() {
        let manager = ShortcutManager::new();
        let kinds = Arc::new(parking_lot::Mutex::new(Vec::new()));
        {
            let kinds = Arc::clone(&kinds);
            manager.subscribe(move |event| kinds.lock().push(event.kind));
        }

        manager.deregister("ghost", &["Ctrl+S"]);
        manager.enable("ghost", &["Ctrl+S"]);
        manager.disable("ghost", &["Ctrl+S"]);
        manager.clear("ghost");

        assert_eq!(
            *kinds.lock(),
            vec![
                RegistryEventKind::Deregister,
                RegistryEventKind::Enable,
                RegistryEventKind::Disable,
                RegistryEventKind::Clear,
            ]
        );
    }

    #[test]
    fn test_callback_may_deregister_itself_mid_dispatch() {
        let manager = Arc::new(ShortcutManager::new());
        let count = Arc::new(AtomicUsize::new(0));
        {
            let manager_inner = Arc::clone(&manager);
            let count = Arc::clone(&count);
            manager.register(
                "once",
                vec![ShortcutDef::new("Escape", move |_| {
                    count.fetch_add(1, Ordering::SeqCst);
                    manager_inner.deregister("once", &["Escape"]);
                })],
            );
        }

        assert_eq!(manager.dispatch(&KeyInput::new("Escape")), 1);
        assert!(!manager.has_owner("once"));
        assert_eq!(manager.dispatch(&KeyInput::new("Escape")), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_may_register_new_shortcuts_mid_dispatch() {
        let manager = Arc::new(ShortcutManager::new());
        {
            let manager_inner = Arc::clone(&manager);
            manager.register(
                "seed",
                vec![ShortcutDef::new("Ctrl+N", move |_| {
                    manager_inner.register("spawned", vec![ShortcutDef::new("Ctrl+M", |_| {})]);
                })],
            );
        }

        // The newly registered shortcut is not visible to the in-flight pass.
        assert_eq!(manager.dispatch(&KeyInput::new("n").with_ctrl(true)), 1);
        assert!(manager.has_owner("spawned"));
        assert_eq!(manager.dispatch(&KeyInput::new("m").with_ctrl(true)), 1);
    }

    #[test]
    fn test_suppression_applies_during_dispatch() {
        let manager = ShortcutManager::new();
        let count = Arc::new(AtomicUsize::new(0));
        manager.register("list", vec![counting_def("j", &count)]);

        let typing = KeyInput::new("j").with_target(TargetKind::TextInput);
        assert_eq!(manager.dispatch(&typing), 0);

        let browsing = KeyInput::new("j");
        assert_eq!(manager.dispatch(&browsing), 1);
    }
}
