//! Widget trait and related types.
//!
//! This module defines the core `Widget` trait and the identity types that
//! flow through event handling:
//!
//! - [`WidgetId`]: unique per mounted widget instance
//! - [`ElementRef`]: a handle for one rendered element of a widget
//! - [`EventResponse`]: what a widget asks of its host after an event
//!
//! # Examples
//!
//! ```
//! use selectkit_core::{ElementRef, Slot, WidgetId};
//!
//! let id = WidgetId::new(7);
//! let option = ElementRef::item(id, 2);
//! assert!(option.is_owned_by(id));
//! assert_eq!(option.slot, Slot::Item(2));
//! assert_eq!(option.dom_id(), "w7-option-2");
//! ```

use crate::event::Event;
use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a widget ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate a process-unique widget ID.
    #[must_use]
    pub fn unique() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Which part of a widget an element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// The widget's outermost container
    Root,
    /// An item, addressed by its original index
    Item(usize),
}

/// Handle for a rendered element, passed through event handling as-is.
///
/// Hosts attach one of these to every element they create for a widget and
/// hand it back on input. The owner check replaces prefix matching on DOM ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    /// Widget the element belongs to
    pub owner: WidgetId,
    /// Part of the widget
    pub slot: Slot,
}

impl ElementRef {
    /// Handle for a widget's root element.
    #[must_use]
    pub const fn root(owner: WidgetId) -> Self {
        Self {
            owner,
            slot: Slot::Root,
        }
    }

    /// Handle for the item at `index`.
    #[must_use]
    pub const fn item(owner: WidgetId, index: usize) -> Self {
        Self {
            owner,
            slot: Slot::Item(index),
        }
    }

    /// Whether this element is part of the given widget's subtree.
    #[must_use]
    pub fn is_owned_by(&self, owner: WidgetId) -> bool {
        self.owner == owner
    }

    /// Item index, if this is an item element.
    #[must_use]
    pub const fn item_index(&self) -> Option<usize> {
        match self.slot {
            Slot::Item(index) => Some(index),
            Slot::Root => None,
        }
    }

    /// Markup identifier for this element. Generated only, never parsed.
    #[must_use]
    pub fn dom_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            Slot::Root => write!(f, "{}", self.owner),
            Slot::Item(index) => write!(f, "{}-option-{index}", self.owner),
        }
    }
}

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// What a widget asks of its host after handling an event.
#[derive(Default)]
pub struct EventResponse {
    /// The event was consumed; the host should suppress its default action.
    pub prevent_default: bool,
    /// Element that should receive keyboard focus.
    pub focus: Option<ElementRef>,
    /// Widget-specific message, if the event produced one.
    pub message: Option<Box<dyn Any>>,
}

impl EventResponse {
    /// The widget did not react to the event.
    #[must_use]
    pub fn ignored() -> Self {
        Self::default()
    }

    /// The widget consumed the event.
    #[must_use]
    pub fn handled() -> Self {
        Self {
            prevent_default: true,
            ..Self::default()
        }
    }

    /// The widget produced a message but leaves the default action alone.
    #[must_use]
    pub fn emit<M: Any>(message: M) -> Self {
        Self {
            message: Some(Box::new(message)),
            ..Self::default()
        }
    }

    /// Request keyboard focus for an element.
    #[must_use]
    pub const fn with_focus(mut self, element: ElementRef) -> Self {
        self.focus = Some(element);
        self
    }

    /// Whether nothing at all happened.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        !self.prevent_default && self.focus.is_none() && self.message.is_none()
    }

    /// Downcast the message to a concrete type.
    #[must_use]
    pub fn message_as<M: Any>(&self) -> Option<&M> {
        self.message.as_ref()?.downcast_ref::<M>()
    }
}

impl fmt::Debug for EventResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventResponse")
            .field("prevent_default", &self.prevent_default)
            .field("focus", &self.focus)
            .field("has_message", &self.message.is_some())
            .finish()
    }
}

/// Core widget trait.
///
/// Widgets live on the UI thread; handlers run to completion one event at a
/// time, so implementations are free to use `Rc`/`RefCell` internally.
pub trait Widget {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Instance identifier, the namespace of every element this widget renders.
    fn id(&self) -> WidgetId;

    /// Record the bounds the host allocated to this widget.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Handle an input event delivered to this widget's subtree.
    fn event(&mut self, event: &Event) -> EventResponse;

    /// Check if this widget is interactive (can receive focus/events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Check if this widget can currently receive keyboard focus.
    fn is_focusable(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// List of selectable options
    ListBox,
    /// One option inside a list box
    ListBoxOption,
}

impl AccessibleRole {
    /// ARIA role attribute value.
    #[must_use]
    pub const fn aria_role(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::ListBox => "listbox",
            Self::ListBoxOption => "option",
        }
    }
}
