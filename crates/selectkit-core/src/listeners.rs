//! Document-level click listeners with scoped registration.
//!
//! A widget that needs to react to clicks anywhere on the page (for example
//! to dismiss a popup on an outside click) subscribes here when it mounts.
//! The returned [`Subscription`] unregisters the listener when it is dropped,
//! so a widget cannot outlive its registration or leak one across instances.
//!
//! The host calls [`DocumentListeners::dispatch_click`] once per click,
//! before delivering the click to the widget that was hit.

use crate::widget::{ElementRef, WidgetId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Callback invoked with the target of every document click.
pub type ClickListener = Box<dyn FnMut(Option<ElementRef>)>;

/// Unique ID for a listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

struct Registration {
    widget_id: WidgetId,
    callback: Rc<RefCell<ClickListener>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    registrations: HashMap<ListenerId, Registration>,
    /// Registration order, which is also dispatch order.
    order: Vec<ListenerId>,
    by_widget: HashMap<WidgetId, Vec<ListenerId>>,
}

impl Registry {
    fn insert(&mut self, widget_id: WidgetId, callback: ClickListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.registrations.insert(
            id,
            Registration {
                widget_id,
                callback: Rc::new(RefCell::new(callback)),
            },
        );
        self.order.push(id);
        self.by_widget.entry(widget_id).or_default().push(id);
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let Some(registration) = self.registrations.remove(&id) else {
            return false;
        };

        self.order.retain(|&other| other != id);
        if let Some(ids) = self.by_widget.get_mut(&registration.widget_id) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.by_widget.remove(&registration.widget_id);
            }
        }
        true
    }
}

/// Registry of document-level click listeners.
///
/// Cloning is cheap and yields a handle to the same registry.
#[derive(Clone, Default)]
pub struct DocumentListeners {
    inner: Rc<RefCell<Registry>>,
}

impl DocumentListeners {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a click listener on behalf of a widget.
    ///
    /// The listener stays registered for as long as the returned
    /// [`Subscription`] is alive.
    pub fn subscribe(&self, widget_id: WidgetId, listener: ClickListener) -> Subscription {
        let id = self.inner.borrow_mut().insert(widget_id, listener);
        tracing::trace!(widget = %widget_id, listener = id.0, "document listener registered");
        Subscription {
            id,
            widget_id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver a click to every registered listener, in registration order.
    ///
    /// Listeners may cancel subscriptions (their own or others') while the
    /// dispatch runs; a listener cancelled mid-dispatch is not invoked.
    /// Returns the number of listeners invoked.
    pub fn dispatch_click(&self, target: Option<ElementRef>) -> usize {
        let snapshot: Vec<(ListenerId, Rc<RefCell<ClickListener>>)> = {
            let registry = self.inner.borrow();
            registry
                .order
                .iter()
                .filter_map(|id| {
                    registry
                        .registrations
                        .get(id)
                        .map(|r| (*id, Rc::clone(&r.callback)))
                })
                .collect()
        };

        let mut invoked = 0;
        for (id, callback) in snapshot {
            if !self.inner.borrow().registrations.contains_key(&id) {
                continue;
            }
            // A listener that re-enters dispatch is not called recursively.
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (&mut *callback)(target);
                invoked += 1;
            }
        }

        tracing::trace!(?target, invoked, "document click dispatched");
        invoked
    }

    /// Number of live registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().registrations.len()
    }

    /// Number of live registrations held by one widget.
    #[must_use]
    pub fn count_for(&self, widget_id: WidgetId) -> usize {
        self.inner
            .borrow()
            .by_widget
            .get(&widget_id)
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for DocumentListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentListeners")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Guard for one listener registration. Dropping it unregisters the listener.
#[must_use = "dropping a Subscription immediately unregisters the listener"]
pub struct Subscription {
    id: ListenerId,
    widget_id: WidgetId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Registration ID.
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Widget that owns the registration.
    pub const fn widget_id(&self) -> WidgetId {
        self.widget_id
    }

    /// Whether the registration is still live.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.borrow().registrations.contains_key(&self.id))
    }

    /// Unregister now. Equivalent to dropping the guard.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.borrow_mut().remove(self.id) {
                tracing::trace!(widget = %self.widget_id, listener = self.id.0, "document listener cancelled");
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("widget_id", &self.widget_id)
            .field("active", &self.is_active())
            .finish()
    }
}
