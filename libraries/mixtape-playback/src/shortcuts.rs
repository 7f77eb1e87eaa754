//! Keyboard shortcuts

use serde::{Deserialize, Serialize};

/// Transport action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortcutAction {
    TogglePlay,
    Next,
    Previous,
    ToggleLoop,
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    fn any(self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// Map a `KeyboardEvent.key` value to an action
///
/// Chords with Ctrl, Meta or Alt belong to the browser and are never taken.
/// Shift is ignored so `N` and `n` behave the same.
pub fn action_for_key(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
    if modifiers.any() {
        return None;
    }
    match key {
        " " | "Spacebar" | "k" | "K" | "MediaPlayPause" => Some(ShortcutAction::TogglePlay),
        "ArrowRight" | "n" | "N" | "MediaTrackNext" => Some(ShortcutAction::Next),
        "ArrowLeft" | "p" | "P" | "MediaTrackPrevious" => Some(ShortcutAction::Previous),
        "l" | "L" => Some(ShortcutAction::ToggleLoop),
        _ => None,
    }
}

/// Whether a key event target accepts text, in which case shortcuts stay off
pub fn is_editable_tag(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_lowercase().as_str(),
        "input" | "textarea" | "select"
    )
}
