//! Select/Dropdown widget for choosing one value from a list of options.
//!
//! The trigger always shows the selected option. Clicking it opens the list
//! of the remaining options; clicking one of those commits it. While open,
//! the arrow keys move focus through the [`NavigationOrder`] and a click
//! anywhere outside the widget closes it again.

use crate::error::SelectError;
use crate::navigation::{step_backward, step_forward, NavigationOrder};
use crate::placement::{LayoutProbe, Orientation};
use crate::view::SelectView;
use selectkit_core::{
    AccessibleRole, DocumentListeners, ElementRef, Event, EventResponse, Key, LayoutResult, Rect,
    Size, Slot, Subscription, TypeId, Widget, WidgetId,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption<T> {
    /// Display label
    pub label: String,
    /// Value reported when this option is chosen
    pub value: T,
}

impl<T> SelectOption<T> {
    /// Create a new option.
    #[must_use]
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl SelectOption<String> {
    /// Create an option where value equals label.
    #[must_use]
    pub fn simple(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            value: text,
        }
    }
}

/// Message emitted when selection changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged<T> {
    /// Original index of the newly selected option
    pub index: usize,
    /// The newly selected value
    pub value: T,
}

/// Message emitted when the trigger opens or closes the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectToggled {
    /// Whether the list is now open
    pub expanded: bool,
}

/// Callback invoked with the newly selected value.
pub type ChangeCallback<T> = Box<dyn FnMut(&T)>;

/// Value equality used to match the default and detect duplicates.
pub type ValueEq<T> = Box<dyn Fn(&T, &T) -> bool>;

/// Construction parameters for a [`Select`].
pub struct SelectProps<T> {
    options: Vec<SelectOption<T>>,
    default_option: Option<T>,
    on_change: Option<ChangeCallback<T>>,
    eq: ValueEq<T>,
}

impl<T: PartialEq + 'static> SelectProps<T> {
    /// Options compared with `PartialEq`.
    #[must_use]
    pub fn new(options: impl IntoIterator<Item = SelectOption<T>>) -> Self {
        Self::with_eq(options, |a: &T, b: &T| a == b)
    }
}

impl<T: 'static> SelectProps<T> {
    /// Options compared with a caller-supplied equality.
    ///
    /// Use this when `T` has no meaningful `PartialEq`, or when identity is
    /// narrower than structural equality.
    #[must_use]
    pub fn with_eq(
        options: impl IntoIterator<Item = SelectOption<T>>,
        eq: impl Fn(&T, &T) -> bool + 'static,
    ) -> Self {
        Self {
            options: options.into_iter().collect(),
            default_option: None,
            on_change: None,
            eq: Box::new(eq),
        }
    }

    /// Value selected initially. Without one the first option is selected.
    #[must_use]
    pub fn default_option(mut self, value: T) -> Self {
        self.default_option = Some(value);
        self
    }

    /// Callback for genuine selection changes.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&T) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Replace the equality function.
    #[must_use]
    pub fn compare_by(mut self, eq: impl Fn(&T, &T) -> bool + 'static) -> Self {
        self.eq = Box::new(eq);
        self
    }

    /// Compare values by a key, e.g. an id field.
    #[must_use]
    pub fn compare_by_key<K: PartialEq>(self, key: impl Fn(&T) -> K + 'static) -> Self {
        self.compare_by(move |a, b| key(a) == key(b))
    }
}

impl<T: fmt::Debug> fmt::Debug for SelectProps<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectProps")
            .field("options", &self.options)
            .field("default_option", &self.default_option)
            .field("has_on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

/// State shared with the document click listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Interaction {
    expanded: bool,
    /// Position in the navigation order. Only meaningful while expanded.
    focus: usize,
    /// Only meaningful while expanded.
    orientation: Orientation,
}

impl Interaction {
    /// Close and reset focus. Returns whether the list was open.
    fn collapse(&mut self) -> bool {
        let was_expanded = self.expanded;
        self.expanded = false;
        self.focus = 0;
        was_expanded
    }
}

/// Select/Dropdown widget.
pub struct Select<T> {
    id: WidgetId,
    options: Vec<SelectOption<T>>,
    /// Original index of the selected option.
    selected: usize,
    order: NavigationOrder,
    interaction: Rc<RefCell<Interaction>>,
    on_change: Option<ChangeCallback<T>>,
    eq: ValueEq<T>,
    probe: Option<Box<dyn LayoutProbe>>,
    /// Trigger bounds from the last layout.
    bounds: Rect,
    /// Viewport from the last resize event.
    viewport: Size,
    subscription: Option<Subscription>,
    test_id_value: Option<String>,
    accessible_name_value: Option<String>,
}

impl<T: 'static> Select<T> {
    /// Create a select, validating the options and the default value.
    pub fn new(props: SelectProps<T>) -> Result<Self, SelectError> {
        let SelectProps {
            options,
            default_option,
            on_change,
            eq,
        } = props;

        validate_options(&options, &eq)?;

        let selected = match default_option {
            Some(default) => options
                .iter()
                .position(|o| eq(&o.value, &default))
                .ok_or(SelectError::DefaultNotFound {
                    count: options.len(),
                })?,
            None => 0,
        };

        let id = WidgetId::unique();
        tracing::debug!(widget = %id, options = options.len(), selected, "select created");

        Ok(Self {
            id,
            order: NavigationOrder::new(options.len(), selected),
            options,
            selected,
            interaction: Rc::new(RefCell::new(Interaction::default())),
            on_change,
            eq,
            probe: None,
            bounds: Rect::default(),
            viewport: Size::ZERO,
            subscription: None,
            test_id_value: None,
            accessible_name_value: None,
        })
    }

    /// Measure the trigger through a host probe when the list opens.
    #[must_use]
    pub fn with_probe(mut self, probe: impl LayoutProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Install a probe after construction.
    pub fn set_probe(&mut self, probe: impl LayoutProbe + 'static) {
        self.probe = Some(Box::new(probe));
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    /// Register the outside-click listener. Mounting again replaces the
    /// previous registration.
    pub fn mount(&mut self, document: &DocumentListeners) {
        let id = self.id;
        let interaction = Rc::downgrade(&self.interaction);
        let subscription = document.subscribe(
            id,
            Box::new(move |target: Option<ElementRef>| {
                if target.is_some_and(|t| t.is_owned_by(id)) {
                    return;
                }
                let Some(interaction) = interaction.upgrade() else {
                    return;
                };
                let Ok(mut state) = interaction.try_borrow_mut() else {
                    return;
                };
                if state.collapse() {
                    tracing::debug!(widget = %id, reason = "outside", "select collapsed");
                }
            }),
        );
        self.subscription = Some(subscription);
    }

    /// Cancel the outside-click listener. Returns whether one was registered.
    pub fn unmount(&mut self) -> bool {
        self.subscription.take().is_some()
    }

    /// Whether the outside-click listener is registered.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All options in original order.
    #[must_use]
    pub fn options(&self) -> &[SelectOption<T>] {
        &self.options
    }

    /// Get option count.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Original index of the selected option.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected option.
    #[must_use]
    pub fn selected_option(&self) -> &SelectOption<T> {
        &self.options[self.selected]
    }

    /// Get selected value.
    #[must_use]
    pub fn selected_value(&self) -> &T {
        &self.selected_option().value
    }

    /// Get selected label.
    #[must_use]
    pub fn selected_label(&self) -> &str {
        &self.selected_option().label
    }

    /// Check if the list is open.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.interaction.borrow().expanded
    }

    /// Current position in the navigation order.
    #[must_use]
    pub fn focus_index(&self) -> usize {
        self.interaction.borrow().focus
    }

    /// Side the list opened on most recently.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.interaction.borrow().orientation
    }

    /// Keyboard traversal order.
    #[must_use]
    pub const fn navigation_order(&self) -> &NavigationOrder {
        &self.order
    }

    /// Element for an original option index. The selected index maps to
    /// the trigger.
    #[must_use]
    pub const fn element(&self, index: usize) -> ElementRef {
        ElementRef::item(self.id, index)
    }

    /// Root element of this select.
    #[must_use]
    pub const fn root_element(&self) -> ElementRef {
        ElementRef::root(self.id)
    }

    /// Element that holds keyboard focus while open.
    #[must_use]
    pub fn focused_element(&self) -> ElementRef {
        self.element_at_position(self.focus_index())
    }

    /// Original index of the first option whose value equals `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.options.iter().position(|o| (self.eq)(&o.value, value))
    }

    /// Snapshot of the rendered surface.
    #[must_use]
    pub fn view(&self) -> SelectView<'_> {
        SelectView::of(self)
    }

    // =========================================================================
    // Programmatic transitions
    // =========================================================================

    /// Close the list without changing the selection.
    pub fn dismiss(&mut self) -> bool {
        self.collapse("dismissed")
    }

    /// Swap in a new option sequence, keeping the current selection.
    ///
    /// Fails with [`SelectError::SelectionNotFound`] when the selected value
    /// is not among the new options; the widget is unchanged on error.
    pub fn replace_options(&mut self, options: Vec<SelectOption<T>>) -> Result<(), SelectError> {
        validate_options(&options, &self.eq)?;
        let current = &self.options[self.selected].value;
        let selected = options
            .iter()
            .position(|o| (self.eq)(&o.value, current))
            .ok_or(SelectError::SelectionNotFound)?;

        self.order = NavigationOrder::new(options.len(), selected);
        self.options = options;
        self.selected = selected;
        self.collapse("replaced");
        Ok(())
    }

    // =========================================================================
    // Internal transitions
    // =========================================================================

    fn element_at_position(&self, position: usize) -> ElementRef {
        let index = self.order.original_index(position).unwrap_or(self.selected);
        self.element(index)
    }

    fn measure_orientation(&self) -> Orientation {
        let (trigger, viewport_height) = self.probe.as_ref().map_or(
            (self.bounds, self.viewport.height),
            |probe| (probe.trigger_rect(), probe.viewport_height()),
        );
        Orientation::for_space(trigger, viewport_height, self.options.len())
    }

    fn expand(&mut self) {
        let orientation = self.measure_orientation();
        let mut state = self.interaction.borrow_mut();
        state.expanded = true;
        state.focus = 0;
        state.orientation = orientation;
        tracing::debug!(widget = %self.id, %orientation, "select expanded");
    }

    fn collapse(&mut self, reason: &'static str) -> bool {
        let was_expanded = self.interaction.borrow_mut().collapse();
        if was_expanded {
            tracing::debug!(widget = %self.id, reason, "select collapsed");
        }
        was_expanded
    }

    fn handle_key(&mut self, key: Key) -> EventResponse {
        let position = {
            let mut state = self.interaction.borrow_mut();
            if !state.expanded {
                return EventResponse::ignored();
            }
            let len = self.order.len();
            state.focus = match key {
                Key::Down => step_forward(state.focus, len),
                Key::Up => step_backward(state.focus, len),
                _ => return EventResponse::ignored(),
            };
            state.focus
        };

        let target = self.element_at_position(position);
        tracing::trace!(widget = %self.id, position, %target, "focus moved");
        EventResponse::handled().with_focus(target)
    }
}

impl<T: Clone + 'static> Select<T> {
    fn handle_click(&mut self, slot: Slot) -> EventResponse {
        let Slot::Item(index) = slot else {
            return EventResponse::ignored();
        };
        if index >= self.options.len() {
            return EventResponse::ignored();
        }

        if index == self.selected {
            let expanded = if self.is_expanded() {
                self.collapse("trigger");
                false
            } else {
                self.expand();
                true
            };
            return EventResponse::emit(SelectToggled { expanded });
        }

        // Listed options are hidden while collapsed.
        if !self.is_expanded() {
            return EventResponse::ignored();
        }

        self.commit(index)
    }

    fn commit(&mut self, index: usize) -> EventResponse {
        self.selected = index;
        self.order = NavigationOrder::new(self.options.len(), index);
        self.collapse("commit");
        tracing::debug!(widget = %self.id, index, "selection committed");

        let value = &self.options[index].value;
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(value);
        }
        EventResponse::emit(SelectionChanged {
            index,
            value: value.clone(),
        })
    }
}

impl<T: Clone + 'static> Widget for Select<T> {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn id(&self) -> WidgetId {
        self.id
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        match event {
            Event::Click {
                target: Some(target),
            } if target.is_owned_by(self.id) => self.handle_click(target.slot),
            Event::KeyDown { key } => self.handle_key(*key),
            Event::Resize { width, height } => {
                self.viewport = Size::new(*width, *height);
                EventResponse::ignored()
            }
            _ => EventResponse::ignored(),
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn is_focusable(&self) -> bool {
        self.is_expanded()
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ListBox
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl<T: fmt::Debug> fmt::Debug for Select<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("interaction", &*self.interaction.borrow())
            .field("mounted", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

fn validate_options<T>(options: &[SelectOption<T>], eq: &ValueEq<T>) -> Result<(), SelectError> {
    if options.is_empty() {
        return Err(SelectError::NoOptions);
    }
    for (first, a) in options.iter().enumerate() {
        if let Some(offset) = options[first + 1..]
            .iter()
            .position(|b| eq(&a.value, &b.value))
        {
            return Err(SelectError::DuplicateValue {
                first,
                second: first + 1 + offset,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::StaticProbe;
    use std::cell::Cell;
    use tracing_test::traced_test;

    fn fruits() -> Vec<SelectOption<&'static str>> {
        vec![
            SelectOption::new("Banana", "banana"),
            SelectOption::new("Orange", "orange"),
            SelectOption::new("Kiwi", "kiwi"),
            SelectOption::new("Pineapple", "pineapple"),
        ]
    }

    fn kiwi_select() -> Select<&'static str> {
        Select::new(SelectProps::new(fruits()).default_option("kiwi")).unwrap()
    }

    fn click(s: &mut Select<&'static str>, index: usize) -> EventResponse {
        let target = s.element(index);
        s.event(&Event::click(target))
    }

    fn key(s: &mut Select<&'static str>, key: Key) -> EventResponse {
        s.event(&Event::KeyDown { key })
    }

    // =========================================================================
    // SelectOption Tests
    // =========================================================================

    #[test]
    fn test_select_option_new() {
        let opt = SelectOption::new("Label", 7u32);
        assert_eq!(opt.label, "Label");
        assert_eq!(opt.value, 7);
    }

    #[test]
    fn test_select_option_simple() {
        let opt = SelectOption::simple("Same");
        assert_eq!(opt.value, "Same");
        assert_eq!(opt.label, "Same");
    }

    // =========================================================================
    // Construction Tests
    // =========================================================================

    #[test]
    fn test_select_defaults_to_first_option() {
        let s = Select::new(SelectProps::new(fruits())).unwrap();
        assert_eq!(s.selected_index(), 0);
        assert_eq!(*s.selected_value(), "banana");
        assert!(!s.is_expanded());
        assert_eq!(s.focus_index(), 0);
    }

    #[test]
    fn test_select_uses_default_option() {
        let s = kiwi_select();
        assert_eq!(s.selected_index(), 2);
        assert_eq!(s.selected_label(), "Kiwi");
        assert_eq!(s.navigation_order().as_slice(), &[2, 0, 1, 3]);
    }

    #[test]
    fn test_select_rejects_empty_options() {
        let err = Select::new(SelectProps::<u8>::new(Vec::new())).unwrap_err();
        assert_eq!(err, SelectError::NoOptions);
    }

    #[test]
    fn test_select_rejects_unmatched_default() {
        let err = Select::new(SelectProps::new(fruits()).default_option("mango")).unwrap_err();
        assert_eq!(err, SelectError::DefaultNotFound { count: 4 });
    }

    #[test]
    fn test_select_rejects_duplicate_values() {
        let options = vec![
            SelectOption::new("A", 1),
            SelectOption::new("B", 2),
            SelectOption::new("A again", 1),
        ];
        let err = Select::new(SelectProps::new(options)).unwrap_err();
        assert_eq!(
            err,
            SelectError::DuplicateValue {
                first: 0,
                second: 2
            }
        );
    }

    #[derive(Debug, Clone)]
    struct Record {
        id: u32,
        note: String,
    }

    #[test]
    fn test_select_compare_by_key_matches_identity() {
        let options = vec![
            SelectOption::new(
                "One",
                Record {
                    id: 1,
                    note: "first".into(),
                },
            ),
            SelectOption::new(
                "Two",
                Record {
                    id: 2,
                    note: "second".into(),
                },
            ),
        ];
        // Default is a different allocation with a different note but the same id.
        let default = Record {
            id: 2,
            note: "stale copy".into(),
        };
        let s = Select::new(
            SelectProps::with_eq(options, |a: &Record, b: &Record| a.id == b.id)
                .default_option(default),
        )
        .unwrap();
        assert_eq!(s.selected_index(), 1);
        assert_eq!(s.selected_value().note, "second");

        let probe = Record {
            id: 1,
            note: String::new(),
        };
        assert_eq!(s.index_of(&probe), Some(0));
    }

    #[test]
    fn test_select_compare_by_key_builder() {
        let options = vec![
            SelectOption::new("a", (1, "x")),
            SelectOption::new("b", (2, "x")),
        ];
        let s = Select::new(
            SelectProps::new(options)
                .compare_by_key(|v| v.0)
                .default_option((2, "other")),
        )
        .unwrap();
        assert_eq!(s.selected_index(), 1);
    }

    #[test]
    fn test_select_props_debug() {
        let props = SelectProps::new(fruits());
        assert!(format!("{props:?}").contains("has_on_change: false"));
        let props = props.on_change(|_| {});
        let debug = format!("{props:?}");
        assert!(debug.contains("has_on_change: true"));
        assert!(debug.contains("Kiwi"));
    }

    #[test]
    fn test_select_builder_metadata() {
        let s = kiwi_select()
            .with_test_id("fruit-select")
            .with_accessible_name("Fruit");
        assert_eq!(Widget::test_id(&s), Some("fruit-select"));
        assert_eq!(s.accessible_name(), Some("Fruit"));
        assert_eq!(s.accessible_role(), AccessibleRole::ListBox);
        assert_eq!(Widget::type_id(&s), TypeId::of::<Select<&'static str>>());
        assert!(s.is_interactive());
    }

    #[test]
    fn test_select_ids_are_unique_per_instance() {
        let a = kiwi_select();
        let b = kiwi_select();
        assert_ne!(a.id(), b.id());
    }

    // =========================================================================
    // Trigger Tests
    // =========================================================================

    #[test]
    fn test_trigger_toggles_without_changing_selection() {
        let mut s = kiwi_select();

        let r = click(&mut s, 2);
        assert!(s.is_expanded());
        assert_eq!(r.message_as::<SelectToggled>(), Some(&SelectToggled { expanded: true }));
        assert!(!r.prevent_default);

        let r = click(&mut s, 2);
        assert!(!s.is_expanded());
        assert_eq!(r.message_as::<SelectToggled>(), Some(&SelectToggled { expanded: false }));
        assert_eq!(s.selected_index(), 2);
    }

    #[test]
    fn test_trigger_never_fires_on_change() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let mut s = Select::new(
            SelectProps::new(fruits())
                .default_option("kiwi")
                .on_change(move |_| c.set(c.get() + 1)),
        )
        .unwrap();

        for _ in 0..5 {
            click(&mut s, 2);
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_focusable_only_while_expanded() {
        let mut s = kiwi_select();
        assert!(!s.is_focusable());
        click(&mut s, 2);
        assert!(s.is_focusable());
    }

    // =========================================================================
    // Commit Tests
    // =========================================================================

    #[test]
    fn test_click_option_commits_and_collapses() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s2 = Rc::clone(&seen);
        let mut s = Select::new(
            SelectProps::new(fruits())
                .default_option("kiwi")
                .on_change(move |v| s2.borrow_mut().push(*v)),
        )
        .unwrap();

        click(&mut s, 2);
        key(&mut s, Key::Down);
        assert_eq!(s.focus_index(), 1);

        let r = click(&mut s, 3);
        assert!(!s.is_expanded());
        assert_eq!(s.focus_index(), 0);
        assert_eq!(*s.selected_value(), "pineapple");
        assert_eq!(*seen.borrow(), vec!["pineapple"]);

        let msg = r.message_as::<SelectionChanged<&'static str>>().unwrap();
        assert_eq!(msg.index, 3);
        assert_eq!(msg.value, "pineapple");
    }

    #[test]
    fn test_commit_recomputes_navigation_order() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        click(&mut s, 0);
        assert_eq!(s.navigation_order().as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_click_hidden_option_while_collapsed_is_ignored() {
        let mut s = kiwi_select();
        let r = click(&mut s, 0);
        assert!(r.is_ignored());
        assert_eq!(s.selected_index(), 2);
        assert!(!s.is_expanded());
    }

    #[test]
    fn test_click_root_is_ignored() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        let root = ElementRef::root(s.id());
        assert!(s.event(&Event::click(root)).is_ignored());
        assert!(s.is_expanded());
    }

    #[test]
    fn test_click_out_of_range_is_ignored() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        assert!(click(&mut s, 99).is_ignored());
        assert!(s.is_expanded());
    }

    #[test]
    fn test_click_on_foreign_element_is_ignored() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        let foreign = ElementRef::item(WidgetId::unique(), 0);
        assert!(s.event(&Event::click(foreign)).is_ignored());
        assert!(s.is_expanded());
    }

    // =========================================================================
    // Keyboard Tests
    // =========================================================================

    #[test]
    fn test_arrow_down_wraps() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        let mut seen = Vec::new();
        for _ in 0..5 {
            let r = key(&mut s, Key::Down);
            assert!(r.prevent_default);
            seen.push(s.focus_index());
        }
        assert_eq!(seen, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_arrow_up_from_zero_goes_last() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        key(&mut s, Key::Up);
        assert_eq!(s.focus_index(), 3);
    }

    #[test]
    fn test_arrow_focus_targets_original_index() {
        let mut s = kiwi_select();
        click(&mut s, 2);

        // Order is [Kiwi, Banana, Orange, Pineapple]
        let r = key(&mut s, Key::Down);
        assert_eq!(r.focus, Some(s.element(0)));

        let r = key(&mut s, Key::Up);
        assert_eq!(r.focus, Some(s.element(2)));
        assert_eq!(s.focused_element(), s.element(2));
    }

    #[test]
    fn test_keys_ignored_while_collapsed() {
        let mut s = kiwi_select();
        assert!(key(&mut s, Key::Down).is_ignored());
        assert!(key(&mut s, Key::Up).is_ignored());
        assert_eq!(s.focus_index(), 0);
    }

    #[test]
    fn test_other_keys_are_noops() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        key(&mut s, Key::Down);
        for k in [Key::Enter, Key::Escape, Key::Left, Key::Char('k'), Key::Tab] {
            assert!(key(&mut s, k).is_ignored());
        }
        assert!(s.is_expanded());
        assert_eq!(s.focus_index(), 1);
    }

    #[test]
    fn test_key_up_event_ignored() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        assert!(s.event(&Event::KeyUp { key: Key::Down }).is_ignored());
        assert_eq!(s.focus_index(), 0);
    }

    #[test]
    fn test_focus_resets_on_close() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        key(&mut s, Key::Down);
        key(&mut s, Key::Down);
        click(&mut s, 2);
        assert_eq!(s.focus_index(), 0);
        click(&mut s, 2);
        assert_eq!(s.focus_index(), 0);
    }

    // =========================================================================
    // Outside Click Tests
    // =========================================================================

    #[test]
    fn test_outside_click_collapses_when_mounted() {
        let document = DocumentListeners::new();
        let mut s = kiwi_select();
        s.mount(&document);
        assert!(s.is_mounted());

        click(&mut s, 2);
        key(&mut s, Key::Down);
        document.dispatch_click(None);
        assert!(!s.is_expanded());
        assert_eq!(s.focus_index(), 0);
        assert_eq!(s.selected_index(), 2);
    }

    #[test]
    fn test_inside_click_does_not_collapse() {
        let document = DocumentListeners::new();
        let mut s = kiwi_select();
        s.mount(&document);
        click(&mut s, 2);

        document.dispatch_click(Some(ElementRef::root(s.id())));
        document.dispatch_click(Some(s.element(0)));
        assert!(s.is_expanded());
    }

    #[test]
    fn test_click_on_other_widget_collapses() {
        let document = DocumentListeners::new();
        let mut a = kiwi_select();
        let mut b = kiwi_select();
        a.mount(&document);
        b.mount(&document);

        click(&mut a, 2);
        document.dispatch_click(Some(b.element(2)));
        click(&mut b, 2);

        assert!(!a.is_expanded());
        assert!(b.is_expanded());
    }

    #[test]
    fn test_unmount_cancels_listener() {
        let document = DocumentListeners::new();
        let mut s = kiwi_select();
        s.mount(&document);
        assert_eq!(document.count_for(s.id()), 1);

        assert!(s.unmount());
        assert!(!s.unmount());
        assert_eq!(document.listener_count(), 0);

        click(&mut s, 2);
        document.dispatch_click(None);
        assert!(s.is_expanded());
    }

    #[test]
    fn test_remount_replaces_registration() {
        let document = DocumentListeners::new();
        let mut s = kiwi_select();
        s.mount(&document);
        s.mount(&document);
        assert_eq!(document.count_for(s.id()), 1);
    }

    #[test]
    fn test_drop_releases_listener() {
        let document = DocumentListeners::new();
        {
            let mut s = kiwi_select();
            s.mount(&document);
            assert_eq!(document.listener_count(), 1);
        }
        assert_eq!(document.listener_count(), 0);
    }

    // =========================================================================
    // Orientation Tests
    // =========================================================================

    #[test]
    fn test_orientation_from_layout_and_resize() {
        let mut s = kiwi_select();
        s.layout(Rect::new(0.0, 680.0, 200.0, 32.0));
        s.event(&Event::Resize {
            width: 1024.0,
            height: 768.0,
        });
        click(&mut s, 2);
        assert_eq!(s.orientation(), Orientation::Up);

        click(&mut s, 2);
        s.layout(Rect::new(0.0, 10.0, 200.0, 32.0));
        click(&mut s, 2);
        assert_eq!(s.orientation(), Orientation::Down);
    }

    #[test]
    fn test_orientation_from_probe() {
        let mut s = kiwi_select().with_probe(StaticProbe {
            trigger: Rect::new(0.0, 500.0, 200.0, 40.0),
            viewport_height: 600.0,
        });
        // 60px below, estimate 160px
        click(&mut s, 2);
        assert_eq!(s.orientation(), Orientation::Up);
    }

    #[test]
    fn test_orientation_unknown_viewport_opens_down() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        assert_eq!(s.orientation(), Orientation::Down);
    }

    #[test]
    fn test_layout_records_bounds() {
        let mut s = kiwi_select();
        let bounds = Rect::new(10.0, 20.0, 200.0, 32.0);
        let result = s.layout(bounds);
        assert_eq!(result.size, bounds.size());
        assert_eq!(s.bounds(), bounds);
    }

    // =========================================================================
    // Programmatic Transition Tests
    // =========================================================================

    #[test]
    fn test_dismiss() {
        let mut s = kiwi_select();
        assert!(!s.dismiss());
        click(&mut s, 2);
        assert!(s.dismiss());
        assert!(!s.is_expanded());
    }

    #[test]
    fn test_replace_options_keeps_selection() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        s.replace_options(vec![
            SelectOption::new("Kiwi", "kiwi"),
            SelectOption::new("Mango", "mango"),
        ])
        .unwrap();
        assert_eq!(s.selected_index(), 0);
        assert_eq!(s.option_count(), 2);
        assert!(!s.is_expanded());
        assert_eq!(s.navigation_order().as_slice(), &[0, 1]);
    }

    #[test]
    fn test_replace_options_without_selection_fails_cleanly() {
        let mut s = kiwi_select();
        let err = s
            .replace_options(vec![SelectOption::new("Mango", "mango")])
            .unwrap_err();
        assert_eq!(err, SelectError::SelectionNotFound);
        assert_eq!(s.option_count(), 4);
        assert_eq!(s.selected_label(), "Kiwi");

        assert_eq!(s.replace_options(Vec::new()), Err(SelectError::NoOptions));
    }

    #[test]
    fn test_select_debug() {
        let s = kiwi_select();
        let dbg = format!("{s:?}");
        assert!(dbg.contains("Select"));
        assert!(dbg.contains("selected: 2"));
    }

    // =========================================================================
    // Logging Tests
    // =========================================================================

    #[test]
    #[traced_test]
    fn test_transitions_are_logged() {
        let mut s = kiwi_select();
        click(&mut s, 2);
        click(&mut s, 1);
        assert!(logs_contain("select expanded"));
        assert!(logs_contain("selection committed"));
        assert!(logs_contain("reason=\"commit\""));
    }
}
