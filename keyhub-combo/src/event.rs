//! Raw key input event model.
//!
//! [`KeyInput`] is the event handed to the dispatcher for every physical key
//! press. The host constructs it from its window system (directly or via the
//! winit adapter in [`crate::platform`]) and the dispatcher exercises the
//! prevent-default / stop-propagation capabilities on behalf of matched
//! registrations.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

/// What kind of element had focus when the key was pressed.
///
/// Used by the text-input suppression policy: plain (modifier-less) shortcuts
/// do not fire while the user is typing into an editable target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// A single-line text input field.
    TextInput,
    /// A multi-line text area.
    TextArea,
    /// Any other editable element (rich text, inline editing).
    Editable,
    /// A non-editable target.
    #[default]
    Other,
}

impl TargetKind {
    /// True for targets that accept typed text.
    pub fn is_text_editable(self) -> bool {
        matches!(self, Self::TextInput | Self::TextArea | Self::Editable)
    }
}

/// One raw key press event at the library boundary.
///
/// Carries the logical key identifier, the physical key code, modifier
/// flags, and the focus target. The `prevent_default` / `stop_propagation`
/// flags use interior mutability so both the dispatcher and callbacks can
/// raise them through a shared reference; dispatch is single-threaded, so no
/// synchronization is involved.
#[derive(Debug, Clone, Default)]
pub struct KeyInput {
    key: String,
    code: String,
    ctrl: bool,
    alt: bool,
    shift: bool,
    meta: bool,
    target: TargetKind,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl KeyInput {
    /// Create an event for the given logical key ("a", "Escape", " ", ...).
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Set the physical key code ("KeyA", "Space", ...).
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Set all four modifier flags at once.
    pub fn with_modifiers(mut self, ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        self.ctrl = ctrl;
        self.alt = alt;
        self.shift = shift;
        self.meta = meta;
        self
    }

    /// Set the ctrl flag.
    pub fn with_ctrl(mut self, on: bool) -> Self {
        self.ctrl = on;
        self
    }

    /// Set the alt flag.
    pub fn with_alt(mut self, on: bool) -> Self {
        self.alt = on;
        self
    }

    /// Set the shift flag.
    pub fn with_shift(mut self, on: bool) -> Self {
        self.shift = on;
        self
    }

    /// Set the meta flag.
    pub fn with_meta(mut self, on: bool) -> Self {
        self.meta = on;
        self
    }

    /// Set the focus target kind.
    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    /// The logical key identifier.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The physical key code, or "" when unknown.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Ctrl flag state.
    pub fn ctrl(&self) -> bool {
        self.ctrl
    }

    /// Alt flag state.
    pub fn alt(&self) -> bool {
        self.alt
    }

    /// Shift flag state.
    pub fn shift(&self) -> bool {
        self.shift
    }

    /// Meta flag state.
    pub fn meta(&self) -> bool {
        self.meta
    }

    /// The focus target kind.
    pub fn target(&self) -> TargetKind {
        self.target
    }

    /// Request that the platform's default handling of this key be skipped.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether default handling has been suppressed.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Request that the event stop propagating to outer handlers.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Whether propagation has been stopped.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}
