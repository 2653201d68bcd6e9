//! DOM `KeyboardEvent.key` values to [`Key`].

use selectkit_core::Key;

/// Convert a DOM key name to a [`Key`].
///
/// Uses the `key` property rather than `code` so that layouts map to the
/// character the user sees.
#[must_use]
pub fn key_from_dom(key: &str) -> Key {
    match key {
        "ArrowUp" | "Up" => Key::Up,
        "ArrowDown" | "Down" => Key::Down,
        "ArrowLeft" | "Left" => Key::Left,
        "ArrowRight" | "Right" => Key::Right,
        "Enter" => Key::Enter,
        "Escape" | "Esc" => Key::Escape,
        "Tab" => Key::Tab,
        " " | "Spacebar" => Key::Space,
        "Home" => Key::Home,
        "End" => Key::End,
        "PageUp" => Key::PageUp,
        "PageDown" => Key::PageDown,
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => Key::Unidentified,
            }
        }
    }
}
