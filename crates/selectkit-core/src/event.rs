//! Input events for widgets.

use crate::widget::ElementRef;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Primary-button click
    Click {
        /// Element that was clicked; `None` when the host has no handle for it
        target: Option<ElementRef>,
    },
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Key released
    KeyUp {
        /// Key released
        key: Key,
    },
    /// Viewport resized
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

impl Event {
    /// Click on an element.
    #[must_use]
    pub const fn click(target: ElementRef) -> Self {
        Self::Click {
            target: Some(target),
        }
    }

    /// Target element of a click, if any.
    #[must_use]
    pub const fn target(&self) -> Option<ElementRef> {
        match self {
            Self::Click { target } => *target,
            _ => None,
        }
    }
}

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Enter/Return key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Space key
    Space,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
    /// Printable character
    Char(char),
    /// Anything the host could not map
    Unidentified,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetId;

    #[test]
    fn test_event_click_target() {
        let el = ElementRef::item(WidgetId::new(1), 3);
        let e = Event::click(el);
        assert_eq!(e.target(), Some(el));

        let e = Event::Click { target: None };
        assert_eq!(e.target(), None);
    }

    #[test]
    fn test_event_key() {
        let e = Event::KeyDown { key: Key::Down };
        assert_eq!(e.target(), None);
        if let Event::KeyDown { key } = e {
            assert_eq!(key, Key::Down);
        } else {
            panic!("Expected KeyDown event");
        }
    }

    #[test]
    fn test_event_resize_has_no_target() {
        let e = Event::Resize {
            width: 800.0,
            height: 600.0,
        };
        assert_eq!(e.target(), None);
    }

    #[test]
    fn test_event_serde() {
        let e = Event::click(ElementRef::root(WidgetId::new(9)));
        let json = serde_json::to_string(&e).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
