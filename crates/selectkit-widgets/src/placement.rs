//! Which side of the trigger the option list opens on.

use selectkit_core::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the trigger the open list renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Above the trigger
    Up,
    /// Below the trigger
    #[default]
    Down,
}

impl Orientation {
    /// Pick a side for a list of `option_count` rows under `trigger`.
    ///
    /// The list height is approximated as `trigger.height * option_count`
    /// instead of being measured, so this needs no layout pass. If that
    /// estimate does not fit strictly below the trigger the list opens
    /// upward. A non-positive viewport height means the host has not
    /// reported one yet; the list then opens downward.
    #[must_use]
    pub fn for_space(trigger: Rect, viewport_height: f32, option_count: usize) -> Self {
        if viewport_height <= 0.0 {
            return Self::Down;
        }
        let space_below = viewport_height - trigger.bottom();
        let estimated_list_height = trigger.height * option_count as f32;
        if space_below <= estimated_list_height {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Attribute value used by presentation styling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host measurement taken at the moment the list opens.
pub trait LayoutProbe {
    /// Trigger bounds in viewport coordinates.
    fn trigger_rect(&self) -> Rect;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f32;
}

/// Fixed measurements, for hosts that already know their layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticProbe {
    /// Trigger bounds
    pub trigger: Rect,
    /// Viewport height
    pub viewport_height: f32,
}

impl LayoutProbe for StaticProbe {
    fn trigger_rect(&self) -> Rect {
        self.trigger
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }
}
