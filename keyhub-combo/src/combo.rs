//! Key combination parsing and formatting.
//!
//! Parses human-readable key strings like "Ctrl+Shift+S" into [`KeyCombo`]
//! values and formats them back into a stable display form. Two combinations
//! are considered the same binding when their display forms are equal.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::names;

/// Error type for strict key parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input contained no tokens at all.
    #[error("empty key combination")]
    Empty,

    /// The input contained only modifiers, e.g. "Ctrl+Shift".
    #[error("key combination has no key, only modifiers")]
    MissingKey,

    /// More than one non-modifier token, e.g. "Ctrl+A+B".
    #[error("multiple keys specified: already have '{first}', found '{second}'")]
    MultipleKeys {
        /// The key that was parsed first.
        first: String,
        /// The extra key token that was rejected.
        second: String,
    },
}

/// A canonical key combination: one primary key plus modifier flags.
///
/// The primary `key` is stored in canonical form: named keys use their
/// platform identifier ("Escape", "ArrowUp", "F5"), the space bar is the
/// literal `" "`, and single characters are lowercase. Modifier flags default
/// to `false`.
///
/// Equality for binding purposes is defined by the display form: two combos
/// denote the same binding iff `a.to_string() == b.to_string()`. Parsing
/// normalizes case and token order, so `"ctrl+s"` and `"Control+S"` produce
/// the same combo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyCombo {
    /// The primary key in canonical form. Empty if the source text had no
    /// non-modifier token; such a combo never matches any event.
    pub key: String,
    /// Control key required.
    pub ctrl: bool,
    /// Alt/Option key required.
    pub alt: bool,
    /// Shift key required.
    pub shift: bool,
    /// Meta/Command/Windows key required.
    pub meta: bool,
}

impl KeyCombo {
    /// Parse a key combination string, tolerating malformed input.
    ///
    /// Tokens are split on `+`, trimmed, and lowercased. Modifier tokens
    /// (with aliases: `ctrl`/`control`, `alt`/`option`, `shift`,
    /// `meta`/`cmd`/`command`/`win`/`windows`) set the corresponding flag;
    /// the remaining token becomes the key, run through the normalization
    /// table. If several non-modifier tokens appear, the last one wins.
    ///
    /// Never fails: empty or modifier-only input yields a combo with an
    /// empty `key`, which simply never matches. Use [`KeyCombo::parse_strict`]
    /// to validate user-supplied strings up front.
    pub fn parse(text: &str) -> Self {
        let mut combo = Self::default();
        for token in text.split('+') {
            let token = token.trim().to_lowercase();
            match token.as_str() {
                "" => {}
                "ctrl" | "control" => combo.ctrl = true,
                "alt" | "option" => combo.alt = true,
                "shift" => combo.shift = true,
                "meta" | "cmd" | "command" | "win" | "windows" => combo.meta = true,
                key => combo.key = names::normalize_key(key),
            }
        }
        combo
    }

    /// Parse a key combination string, rejecting malformed input.
    ///
    /// Unlike [`KeyCombo::parse`], this returns an error for empty input,
    /// modifier-only input, and input with more than one non-modifier token.
    /// Intended for validating configuration before it reaches a registry.
    ///
    /// # Errors
    /// Returns [`ParseError`] describing the first problem found.
    pub fn parse_strict(text: &str) -> Result<Self, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let mut combo = Self::default();
        for token in text.split('+') {
            let token = token.trim().to_lowercase();
            match token.as_str() {
                "" => {}
                "ctrl" | "control" => combo.ctrl = true,
                "alt" | "option" => combo.alt = true,
                "shift" => combo.shift = true,
                "meta" | "cmd" | "command" | "win" | "windows" => combo.meta = true,
                key => {
                    if !combo.key.is_empty() {
                        return Err(ParseError::MultipleKeys {
                            first: combo.key,
                            second: key.to_string(),
                        });
                    }
                    combo.key = names::normalize_key(key);
                }
            }
        }

        if combo.key.is_empty() {
            return Err(ParseError::MissingKey);
        }
        Ok(combo)
    }

    /// True when any modifier other than shift is set.
    ///
    /// Shift alone does not exempt a combo from text-input suppression, so
    /// the matcher distinguishes "plain or shifted key" from "command chord".
    pub fn has_non_shift_modifier(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }

    /// Whether two combos denote the same binding (display forms are equal).
    pub fn canonical_eq(&self, other: &KeyCombo) -> bool {
        self.to_string() == other.to_string()
    }
}

impl fmt::Display for KeyCombo {
    /// Formats in fixed `Ctrl+Alt+Shift+Meta+Key` order with the key
    /// capitalized for single characters and `" "` rendered as "Space".
    ///
    /// `format(parse(s))` need not equal `s` verbatim, but it is stable:
    /// re-parsing and re-formatting the output yields the output itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        if self.meta {
            parts.push("Meta".to_string());
        }
        parts.push(names::display_key(&self.key));
        write!(f, "{}", parts.join("+"))
    }
}
