//! Browser event handling - converts web events to selectkit Events.
//!
//! Clicked DOM nodes are resolved to [`ElementRef`] handles by element
//! identity, walking up from the event target until a registered element is
//! found.

use super::keys::key_from_dom;
use selectkit_core::{ElementRef, Event, WidgetId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, KeyboardEvent, Node};

/// Elements rendered by every widget on a host, with their handles.
#[derive(Clone, Default)]
pub struct ElementRegistry {
    entries: Rc<RefCell<Vec<(Element, ElementRef)>>>,
}

impl ElementRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every element registered for `owner`.
    pub fn replace(&self, owner: WidgetId, elements: Vec<(Element, ElementRef)>) {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|(_, r)| !r.is_owned_by(owner));
        entries.extend(elements);
    }

    /// Forget every element registered for `owner`.
    pub fn remove(&self, owner: WidgetId) {
        self.entries.borrow_mut().retain(|(_, r)| !r.is_owned_by(owner));
    }

    /// Handle of the registered element itself.
    #[must_use]
    pub fn lookup(&self, node: &Node) -> Option<ElementRef> {
        self.entries
            .borrow()
            .iter()
            .find(|(el, _)| el.is_same_node(Some(node)))
            .map(|(_, r)| *r)
    }

    /// Handle of the nearest registered ancestor of an event target.
    #[must_use]
    pub fn resolve(&self, target: Option<EventTarget>) -> Option<ElementRef> {
        let mut node = target?.dyn_into::<Node>().ok();
        while let Some(current) = node {
            if let Some(found) = self.lookup(&current) {
                return Some(found);
            }
            node = current.parent_node();
        }
        None
    }

    /// Registered element for a handle.
    #[must_use]
    pub fn element(&self, handle: ElementRef) -> Option<Element> {
        self.entries
            .borrow()
            .iter()
            .find(|(_, r)| *r == handle)
            .map(|(el, _)| el.clone())
    }
}

/// Convert a web_sys `keydown` event to a selectkit Event.
pub fn keyboard_event_to_selectkit(event: &KeyboardEvent) -> Event {
    Event::KeyDown {
        key: key_from_dom(&event.key()),
    }
}

/// Convert a click to a selectkit Event, resolving its target.
pub fn click_event_to_selectkit(event: &web_sys::Event, registry: &ElementRegistry) -> Event {
    Event::Click {
        target: registry.resolve(event.target()),
    }
}
