//! Key event matching.
//!
//! Decides whether a [`KeyInput`] satisfies a [`KeyCombo`], including the
//! text-input suppression policy applied by the dispatcher.

use crate::combo::KeyCombo;
use crate::event::KeyInput;

/// Check if an input event matches a key combination.
///
/// Key comparison is case-insensitive when both sides are a single character
/// and exact otherwise; an event whose physical code is the space bar matches
/// the canonical `" "` key. A combo with an empty key never matches.
///
/// Modifier comparison is exact per flag, with two deliberate exceptions for
/// cross-platform portability:
///
/// - a required `ctrl` is satisfied by the event's ctrl OR meta flag, so
///   Cmd-based chords on macOS trigger Ctrl bindings;
/// - `meta` is only checked when the combo requires it. A combo with
///   `meta: false` does not reject events that have meta held.
///
/// `alt` and `shift` are strict equality.
pub fn matches(event: &KeyInput, combo: &KeyCombo) -> bool {
    if combo.key.is_empty() {
        return false;
    }
    key_matches(event, combo) && modifiers_match(event, combo)
}

/// Whether the text-input suppression policy withholds this match.
///
/// While an editable element has focus, combos without ctrl/alt/meta are
/// suppressed so typing proceeds unimpeded. Shift does not exempt a combo;
/// modifier-bearing chords like Ctrl+S still fire inside inputs.
pub fn is_suppressed(event: &KeyInput, combo: &KeyCombo) -> bool {
    event.target().is_text_editable() && !combo.has_non_shift_modifier()
}

/// [`matches`] with the suppression policy applied; the dispatcher's test.
pub fn matches_with_suppression(event: &KeyInput, combo: &KeyCombo) -> bool {
    !is_suppressed(event, combo) && matches(event, combo)
}

fn key_matches(event: &KeyInput, combo: &KeyCombo) -> bool {
    let event_key = event.key();
    let combo_key = combo.key.as_str();

    if combo_key == " " && event.code() == "Space" {
        return true;
    }
    if is_single_char(event_key) && is_single_char(combo_key) {
        return event_key.eq_ignore_ascii_case(combo_key);
    }
    event_key == combo_key
}

fn modifiers_match(event: &KeyInput, combo: &KeyCombo) -> bool {
    let ctrl_ok = if combo.ctrl {
        event.ctrl() || event.meta()
    } else {
        !event.ctrl()
    };
    let meta_ok = !combo.meta || event.meta();
    ctrl_ok && meta_ok && combo.alt == event.alt() && combo.shift == event.shift()
}

fn is_single_char(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some() && chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TargetKind;

    #[test]
    fn test_plain_character_match_is_case_insensitive() {
        let combo = KeyCombo::parse("s");
        assert!(matches(&KeyInput::new("s"), &combo));
        assert!(matches(&KeyInput::new("S"), &combo));
        assert!(!matches(&KeyInput::new("a"), &combo));
    }

    #[test]
    fn test_named_key_match_is_exact() {
        let combo = KeyCombo::parse("Escape");
        assert!(matches(&KeyInput::new("Escape"), &combo));
        assert!(!matches(&KeyInput::new("escape"), &combo));
        assert!(!matches(&KeyInput::new("Enter"), &combo));
    }

    #[test]
    fn test_space_matches_by_physical_code() {
        let combo = KeyCombo::parse("Space");
        assert!(matches(&KeyInput::new(" "), &combo));
        assert!(matches(&KeyInput::new("").with_code("Space"), &combo));
        assert!(!matches(&KeyInput::new("a").with_code("KeyA"), &combo));
    }

    #[test]
    fn test_empty_key_combo_never_matches() {
        let dead = KeyCombo::parse("Ctrl+");
        assert!(!matches(&KeyInput::new("").with_ctrl(true), &dead));
        assert!(!matches(&KeyInput::new("a").with_ctrl(true), &dead));
    }

    #[test]
    fn test_required_ctrl_accepts_physical_ctrl() {
        let combo = KeyCombo::parse("Ctrl+S");
        assert!(matches(&KeyInput::new("s").with_ctrl(true), &combo));
        assert!(!matches(&KeyInput::new("s"), &combo));
    }

    #[test]
    fn test_required_ctrl_accepts_meta_as_equivalent() {
        let combo = KeyCombo::parse("Ctrl+S");
        assert!(matches(&KeyInput::new("s").with_meta(true), &combo));
    }

    #[test]
    fn test_unrequired_ctrl_rejects_held_ctrl() {
        let combo = KeyCombo::parse("s");
        assert!(!matches(&KeyInput::new("s").with_ctrl(true), &combo));
    }

    #[test]
    fn test_required_meta_needs_physical_meta() {
        let combo = KeyCombo::parse("Meta+K");
        assert!(matches(&KeyInput::new("k").with_meta(true), &combo));
        assert!(!matches(&KeyInput::new("k").with_ctrl(true), &combo));
    }

    #[test]
    fn test_unrequired_meta_is_not_checked() {
        // The asymmetric side of the ctrl/meta rule: meta held on the event
        // does not disqualify a meta-less combo.
        let combo = KeyCombo::parse("s");
        assert!(matches(&KeyInput::new("s").with_meta(true), &combo));
    }

    #[test]
    fn test_alt_and_shift_are_strict() {
        let combo = KeyCombo::parse("Alt+Shift+ArrowUp");
        let exact = KeyInput::new("ArrowUp").with_alt(true).with_shift(true);
        assert!(matches(&exact, &combo));

        let missing_shift = KeyInput::new("ArrowUp").with_alt(true);
        assert!(!matches(&missing_shift, &combo));

        let extra_alt = KeyInput::new("ArrowUp").with_shift(true);
        assert!(!matches(&extra_alt, &combo));

        let plain = KeyCombo::parse("ArrowUp");
        assert!(!matches(&KeyInput::new("ArrowUp").with_shift(true), &plain));
    }

    #[test]
    fn test_plain_combo_suppressed_in_text_input() {
        let combo = KeyCombo::parse("s");
        let event = KeyInput::new("s").with_target(TargetKind::TextInput);
        assert!(is_suppressed(&event, &combo));
        assert!(!matches_with_suppression(&event, &combo));
        // The same key press matches on a non-editable target.
        assert!(matches_with_suppression(&KeyInput::new("s"), &combo));
    }

    #[test]
    fn test_shift_does_not_exempt_from_suppression() {
        let combo = KeyCombo::parse("Shift+S");
        let event = KeyInput::new("S")
            .with_shift(true)
            .with_target(TargetKind::Editable);
        assert!(is_suppressed(&event, &combo));
    }

    #[test]
    fn test_modifier_chord_fires_inside_text_input() {
        let combo = KeyCombo::parse("Ctrl+S");
        let event = KeyInput::new("s")
            .with_ctrl(true)
            .with_target(TargetKind::TextArea);
        assert!(!is_suppressed(&event, &combo));
        assert!(matches_with_suppression(&event, &combo));
    }
}
