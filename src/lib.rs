//! keyhub: keyboard shortcut coordination for interactive UIs.
//!
//! Independent UI components register key combinations under an owner id and
//! a single dispatcher routes raw key events to the matching enabled
//! callbacks. The pieces:
//!
//! - [`KeyCombo`]: canonical key-combination model, parsed from strings
//!   like "Ctrl+Shift+S" (see [`keyhub_combo::combo`])
//! - [`KeyInput`]: the raw key event fed to the dispatcher, with
//!   prevent-default / stop-propagation capabilities
//! - [`ShortcutManager`]: the registry and dispatcher; one per application,
//!   shared via `Arc`
//! - [`OwnerScope`]: a per-component façade that cleans up its owner's
//!   registrations on drop
//! - registry change events, observable via [`ShortcutManager::subscribe`],
//!   for display panels that list live shortcuts
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use keyhub::{KeyInput, OwnerScope, ShortcutDef, ShortcutManager};
//!
//! let manager = Arc::new(ShortcutManager::new());
//!
//! let editor = OwnerScope::new(Arc::clone(&manager), "editor");
//! editor.register(vec![
//!     ShortcutDef::new("Ctrl+S", |_| println!("save")).description("Save document"),
//! ]);
//!
//! // The host feeds raw key events to the dispatcher:
//! let event = KeyInput::new("s").with_ctrl(true);
//! assert_eq!(manager.dispatch(&event), 1);
//! assert!(event.default_prevented());
//! ```

/// Library version (root crate version, for use by hosts).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use keyhub_combo::{KeyCombo, KeyInput, ParseError, TargetKind, matcher, platform};
pub use keyhub_registry::{
    EventBus, OwnerScope, RegistryEvent, RegistryEventKind, ShortcutCallback, ShortcutDef,
    ShortcutManager, ShortcutSnapshot, StreamHook, SubscriberId,
};
