//! Shortcut registry and dispatch for keyhub.
//!
//! This crate holds the stateful half of the shortcut system:
//!
//! - [`ShortcutManager`]: the constructible registry instance, holding
//!   per-owner shortcut collections, dispatching raw key events to matching
//!   enabled callbacks, with automatic listening-state transitions
//! - [`EventBus`]: synchronous observer notification of registry changes
//! - [`OwnerScope`]: a per-consumer façade that cleans up its owner's
//!   registrations when dropped
//!
//! One manager instance is expected per application, owned by the
//! composition root and shared via `Arc`.

mod bus;
mod manager;
mod registration;
mod registry;
mod scope;

pub use bus::{EventBus, RegistryEvent, RegistryEventKind, SubscriberId};
pub use manager::{ShortcutManager, StreamHook};
pub use registration::{ShortcutCallback, ShortcutDef, ShortcutSnapshot};
pub use scope::OwnerScope;
