//! Window-system interop.
//!
//! Converts winit key events into the [`KeyInput`] model so hosts driving a
//! winit event loop can feed the dispatcher directly.

use winit::event::{KeyEvent, Modifiers};
use winit::keyboard::{Key, NamedKey, PhysicalKey};

use crate::event::{KeyInput, TargetKind};

impl KeyInput {
    /// Build a [`KeyInput`] from a winit key event and modifier state.
    ///
    /// The logical key becomes the event's key identifier (characters as-is,
    /// named keys by their canonical name, the space bar as `" "`), the
    /// physical key becomes the code string, and winit's super key maps to
    /// `meta`. The focus target is supplied by the host, which knows what its
    /// UI is focusing.
    pub fn from_winit(event: &KeyEvent, modifiers: &Modifiers, target: TargetKind) -> Self {
        let state = modifiers.state();
        KeyInput::new(logical_key_name(&event.logical_key))
            .with_code(physical_key_name(event.physical_key))
            .with_modifiers(
                state.control_key(),
                state.alt_key(),
                state.shift_key(),
                state.super_key(),
            )
            .with_target(target)
    }
}

/// Canonical name for a winit logical key, or "" when unidentified.
pub fn logical_key_name(key: &Key) -> String {
    match key {
        Key::Character(c) => c.to_string(),
        Key::Named(NamedKey::Space) => " ".to_string(),
        Key::Named(named) => format!("{:?}", named),
        _ => String::new(),
    }
}

/// Code string for a winit physical key, or "" when unidentified.
pub fn physical_key_name(key: PhysicalKey) -> String {
    match key {
        PhysicalKey::Code(code) => format!("{:?}", code),
        PhysicalKey::Unidentified(_) => String::new(),
    }
}

// Note: `KeyInput::from_winit` itself is not unit-tested because winit's
// `KeyEvent` has private fields and cannot be constructed outside winit.
// The name helpers above carry the conversion logic and are testable.
