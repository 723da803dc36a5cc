//! Key name normalization tables.
//!
//! Maps the human-readable aliases accepted in key combination strings to the
//! platform key-identifier names used canonically ("esc" -> "Escape",
//! "up" -> "ArrowUp", "space" -> " ", ...).

/// Normalize a single lowercased key token to its canonical identifier.
///
/// Unrecognized tokens pass through unchanged; a literal letter or digit is
/// assumed to already be canonical.
pub(crate) fn normalize_key(token: &str) -> String {
    let canonical = match token {
        // Common named keys
        "esc" | "escape" => "Escape",
        "enter" | "return" => "Enter",
        "space" | "spacebar" => " ",
        "tab" => "Tab",
        "backspace" => "Backspace",
        "delete" | "del" => "Delete",
        "insert" | "ins" => "Insert",
        "home" => "Home",
        "end" => "End",
        "pageup" | "pgup" => "PageUp",
        "pagedown" | "pgdn" => "PageDown",

        // Arrow keys
        "up" | "arrowup" => "ArrowUp",
        "down" | "arrowdown" => "ArrowDown",
        "left" | "arrowleft" => "ArrowLeft",
        "right" | "arrowright" => "ArrowRight",

        // Function keys
        "f1" => "F1",
        "f2" => "F2",
        "f3" => "F3",
        "f4" => "F4",
        "f5" => "F5",
        "f6" => "F6",
        "f7" => "F7",
        "f8" => "F8",
        "f9" => "F9",
        "f10" => "F10",
        "f11" => "F11",
        "f12" => "F12",

        _ => return token.to_string(),
    };
    canonical.to_string()
}

/// Render a canonical key for display: single characters are capitalized and
/// the space key is spelled out as "Space".
pub(crate) fn display_key(key: &str) -> String {
    if key == " " {
        return "Space".to_string();
    }
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_ascii_uppercase().to_string(),
        _ => key.to_string(),
    }
}
