//! Test harness for driving a [`Select`] the way a browser would.
//!
//! Clicks go to the document first (capture phase), then to the widget if
//! they landed inside it. Key presses go to the widget as a down/up pair.
//! Every selection callback is recorded.

use selectkit_core::{
    DocumentListeners, ElementRef, Event, EventResponse, Key, Rect, Widget, WidgetId,
};
use selectkit_widgets::{Orientation, Select, SelectError, SelectProps, SelectToggled, SelectView};
use std::cell::RefCell;
use std::rc::Rc;

/// Test harness for interacting with a select widget.
pub struct Harness<T> {
    select: Select<T>,
    document: DocumentListeners,
    changes: Rc<RefCell<Vec<T>>>,
    /// Element the host last moved keyboard focus to
    focused: Option<ElementRef>,
    prevented_defaults: usize,
    toggles: Vec<bool>,
}

impl<T: Clone + 'static> Harness<T> {
    /// Build and mount a select from props.
    ///
    /// Any `on_change` callback on `props` is replaced by the harness
    /// recorder; read the calls back with [`Harness::changes`].
    pub fn new(props: SelectProps<T>) -> Result<Self, SelectError> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&changes);
        let props = props.on_change(move |value: &T| recorder.borrow_mut().push(value.clone()));

        let document = DocumentListeners::new();
        let mut select = Select::new(props)?;
        select.mount(&document);

        Ok(Self {
            select,
            document,
            changes,
            focused: None,
            prevented_defaults: 0,
            toggles: Vec::new(),
        })
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.resize(width, height);
        self
    }

    /// Lay the trigger out at `bounds`.
    #[must_use]
    pub fn at(mut self, bounds: Rect) -> Self {
        self.select.layout(bounds);
        self
    }

    // === Event Simulation ===

    /// Click the trigger.
    pub fn click_trigger(&mut self) -> &mut Self {
        let target = self.select.element(self.select.selected_index());
        self.click(Some(target))
    }

    /// Click the visible option with this label. Hidden options cannot be
    /// clicked; returns whether one was found.
    pub fn click_option(&mut self, label: &str) -> bool {
        let target = self
            .select
            .view()
            .visible_options()
            .find(|o| o.label == label)
            .map(|o| o.id);
        match target {
            Some(target) => {
                self.click(Some(target));
                true
            }
            None => false,
        }
    }

    /// Click the widget's root container.
    pub fn click_root(&mut self) -> &mut Self {
        let root = self.select.root_element();
        self.click(Some(root))
    }

    /// Click somewhere on the page that belongs to no widget.
    pub fn click_outside(&mut self) -> &mut Self {
        self.click(None)
    }

    /// Click an element owned by some other widget.
    pub fn click_foreign(&mut self) -> &mut Self {
        self.click(Some(ElementRef::root(WidgetId::unique())))
    }

    /// Deliver a click to the document, then to the widget if it is the target.
    pub fn click(&mut self, target: Option<ElementRef>) -> &mut Self {
        tracing::trace!(?target, "harness click");
        self.document.dispatch_click(target);
        if let Some(target) = target.filter(|t| t.is_owned_by(self.select.id())) {
            let response = self.select.event(&Event::click(target));
            self.apply(&response);
        }
        self
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        for event in [Event::KeyDown { key }, Event::KeyUp { key }] {
            let response = self.select.event(&event);
            self.apply(&response);
        }
        self
    }

    /// Press a key `times` times.
    pub fn press_key_n(&mut self, key: Key, times: usize) -> &mut Self {
        for _ in 0..times {
            self.press_key(key);
        }
        self
    }

    /// Report a viewport resize to the widget.
    pub fn resize(&mut self, width: f32, height: f32) -> &mut Self {
        let response = self.select.event(&Event::Resize { width, height });
        self.apply(&response);
        self
    }

    /// Unmount the widget from the document.
    pub fn unmount(&mut self) -> &mut Self {
        self.select.unmount();
        self
    }

    fn apply(&mut self, response: &EventResponse) {
        if response.prevent_default {
            self.prevented_defaults += 1;
        }
        if let Some(focus) = response.focus {
            self.focused = Some(focus);
        }
        if let Some(toggled) = response.message_as::<SelectToggled>() {
            self.toggles.push(toggled.expanded);
        }
    }

    // === Queries ===

    /// The widget under test.
    #[must_use]
    pub fn select(&self) -> &Select<T> {
        &self.select
    }

    /// Mutable access for programmatic transitions.
    pub fn select_mut(&mut self) -> &mut Select<T> {
        &mut self.select
    }

    /// The document the widget is mounted in.
    #[must_use]
    pub fn document(&self) -> &DocumentListeners {
        &self.document
    }

    /// Rendered surface.
    #[must_use]
    pub fn view(&self) -> SelectView<'_> {
        self.select.view()
    }

    /// Check if the list is open.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.select.is_expanded()
    }

    /// Label shown in the trigger.
    #[must_use]
    pub fn selected_label(&self) -> &str {
        self.select.selected_label()
    }

    /// Selected value.
    #[must_use]
    pub fn selected_value(&self) -> &T {
        self.select.selected_value()
    }

    /// Labels of every visible option, trigger first.
    #[must_use]
    pub fn visible_labels(&self) -> Vec<String> {
        self.view()
            .visible_options()
            .map(|o| o.label.to_string())
            .collect()
    }

    /// Labels of the open list, without the trigger.
    #[must_use]
    pub fn listed_labels(&self) -> Vec<String> {
        self.view()
            .listed_labels()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Labels in keyboard traversal order.
    #[must_use]
    pub fn navigable_labels(&self) -> Vec<String> {
        let options = self.select.options();
        self.select
            .navigation_order()
            .as_slice()
            .iter()
            .map(|&i| options[i].label.clone())
            .collect()
    }

    /// Current focus position in the navigation order.
    #[must_use]
    pub fn focus_index(&self) -> usize {
        self.select.focus_index()
    }

    /// Label of the element the host last focused.
    #[must_use]
    pub fn focused_label(&self) -> Option<&str> {
        let index = self.focused?.item_index()?;
        self.select.options().get(index).map(|o| o.label.as_str())
    }

    /// Side the list opened on.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.select.orientation()
    }

    /// Values passed to `on_change`, in call order.
    #[must_use]
    pub fn changes(&self) -> Vec<T> {
        self.changes.borrow().clone()
    }

    /// Number of `on_change` calls.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.changes.borrow().len()
    }

    /// Number of events whose default action was suppressed.
    #[must_use]
    pub fn prevented_defaults(&self) -> usize {
        self.prevented_defaults
    }

    /// Expanded flags from every toggle message, in order.
    #[must_use]
    pub fn toggles(&self) -> &[bool] {
        &self.toggles
    }

    // === Assertions ===

    /// Assert the list is open.
    ///
    /// # Panics
    ///
    /// Panics if the list is closed.
    pub fn assert_expanded(&self) -> &Self {
        assert!(self.is_expanded(), "Expected select to be expanded");
        self
    }

    /// Assert the list is closed.
    ///
    /// # Panics
    ///
    /// Panics if the list is open.
    pub fn assert_collapsed(&self) -> &Self {
        assert!(!self.is_expanded(), "Expected select to be collapsed");
        self
    }

    /// Assert the trigger shows `expected`.
    ///
    /// # Panics
    ///
    /// Panics if another option is selected.
    pub fn assert_selected(&self, expected: &str) -> &Self {
        let actual = self.selected_label();
        assert_eq!(
            actual, expected,
            "Expected '{expected}' to be selected but got '{actual}'"
        );
        self
    }

    /// Assert the number of `on_change` calls.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_change_count(&self, expected: usize) -> &Self {
        let actual = self.change_count();
        assert_eq!(
            actual, expected,
            "Expected {expected} on_change calls but found {actual}"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selectkit_widgets::SelectOption;

    fn harness() -> Harness<&'static str> {
        let options = vec![
            SelectOption::new("Red", "red"),
            SelectOption::new("Green", "green"),
            SelectOption::new("Blue", "blue"),
        ];
        Harness::new(SelectProps::new(options)).unwrap()
    }

    #[test]
    fn test_harness_mounts() {
        let h = harness();
        assert!(h.select().is_mounted());
        assert_eq!(h.document().listener_count(), 1);
    }

    #[test]
    fn test_harness_records_changes() {
        let mut h = harness();
        h.click_trigger();
        assert!(h.click_option("Blue"));
        assert_eq!(h.changes(), vec!["blue"]);
        h.assert_change_count(1).assert_selected("Blue").assert_collapsed();
    }

    #[test]
    fn test_harness_replaces_user_callback() {
        let called = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&called);
        let options = vec![SelectOption::new("A", 1), SelectOption::new("B", 2)];
        let mut h =
            Harness::new(SelectProps::new(options).on_change(move |_| *flag.borrow_mut() = true))
                .unwrap();
        h.click_trigger();
        h.click_option("B");
        assert!(!*called.borrow());
        assert_eq!(h.changes(), vec![2]);
    }

    #[test]
    fn test_hidden_option_not_clickable() {
        let mut h = harness();
        assert!(!h.click_option("Green"));
        assert!(!h.click_option("Purple"));
        h.assert_collapsed();
    }

    #[test]
    fn test_harness_tracks_toggles_and_prevent_default() {
        let mut h = harness();
        h.click_trigger();
        h.press_key(Key::Down);
        h.click_trigger();
        assert_eq!(h.toggles(), &[true, false]);
        assert_eq!(h.prevented_defaults(), 1);
        assert_eq!(h.focused_label(), Some("Green"));
    }

    #[test]
    fn test_harness_unmount() {
        let mut h = harness();
        h.unmount();
        assert_eq!(h.document().listener_count(), 0);
        h.click_trigger().click_outside();
        h.assert_expanded();
    }

    #[test]
    fn test_harness_builders() {
        let h = harness()
            .viewport(800.0, 600.0)
            .at(Rect::new(0.0, 560.0, 100.0, 30.0));
        assert_eq!(h.select().bounds(), Rect::new(0.0, 560.0, 100.0, 30.0));
        let mut h = h;
        h.click_trigger();
        assert_eq!(h.orientation(), Orientation::Up);
    }
}
