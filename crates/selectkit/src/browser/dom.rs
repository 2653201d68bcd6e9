//! DOM host: mounts selects into real elements and wires browser events.

use super::events::{click_event_to_selectkit, keyboard_event_to_selectkit, ElementRegistry};
use crate::demo::{fruit_props, Fruit};
use selectkit_core::{
    DocumentListeners, ElementRef, EventResponse, Rect, Subscription, Widget, WidgetId,
};
use selectkit_widgets::{LayoutProbe, Orientation, OptionNode, Select, SelectProps};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement, KeyboardEvent, Node};

/// Page-level state shared by every select mounted on a document.
///
/// Owns the single capture-phase document click listener, which resolves
/// the clicked node and fans the click out to [`DocumentListeners`] before
/// the click reaches any widget. The listener is removed on drop.
pub struct DomHost {
    document: Document,
    listeners: DocumentListeners,
    registry: ElementRegistry,
    capture: Closure<dyn FnMut(web_sys::Event)>,
}

impl DomHost {
    /// Attach to the window's document.
    pub fn new() -> Result<Self, JsValue> {
        let document = window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        let listeners = DocumentListeners::new();
        let registry = ElementRegistry::new();
        let capture: Closure<dyn FnMut(web_sys::Event)> = {
            let listeners = listeners.clone();
            let registry = registry.clone();
            Closure::new(move |e: web_sys::Event| {
                let target = registry.resolve(e.target());
                listeners.dispatch_click(target);
            })
        };
        document.add_event_listener_with_callback_and_bool(
            "click",
            capture.as_ref().unchecked_ref(),
            true,
        )?;
        tracing::debug!("document click capture installed");

        Ok(Self {
            document,
            listeners,
            registry,
            capture,
        })
    }

    /// The page document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Document-level click subscriptions.
    #[must_use]
    pub fn listeners(&self) -> &DocumentListeners {
        &self.listeners
    }

    /// Rendered elements of every mounted select.
    #[must_use]
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback_and_bool(
            "click",
            self.capture.as_ref().unchecked_ref(),
            true,
        );
        tracing::debug!("document click capture removed");
    }
}

/// Measures an element and the window when a list opens.
pub struct ElementProbe {
    element: Element,
}

impl ElementProbe {
    /// Probe for an element.
    #[must_use]
    pub const fn new(element: Element) -> Self {
        Self { element }
    }
}

impl LayoutProbe for ElementProbe {
    fn trigger_rect(&self) -> Rect {
        let rect = self.element.get_bounding_client_rect();
        Rect::new(
            rect.x() as f32,
            rect.y() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    fn viewport_height(&self) -> f32 {
        window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
            .map_or(0.0, |h| h as f32)
    }
}

struct Mounted<T> {
    select: Select<T>,
    document: Document,
    root: HtmlElement,
    registry: ElementRegistry,
    rendered_expanded: bool,
}

impl<T: Clone + 'static> Mounted<T> {
    fn render(&mut self) -> Result<(), JsValue> {
        let view = self.select.view();
        let root: &Element = self.root.as_ref();

        root.set_inner_html("");
        for (name, value) in view.root.attributes() {
            root.set_attribute(name, &value)?;
        }
        let mut elements = vec![(root.clone(), view.root.id)];

        let trigger = option_button(&self.document, &view.trigger)?;
        root.append_child(&trigger)?;
        elements.push((trigger.clone(), view.trigger.id));

        if let Some(list) = &view.list {
            let container = self.document.create_element("div")?;
            for (name, value) in list.attributes() {
                container.set_attribute(name, &value)?;
            }
            for option in &list.options {
                let button = option_button(&self.document, option)?;
                container.append_child(&button)?;
                elements.push((button, option.id));
            }
            match list.orientation {
                Orientation::Up => {
                    let first: &Node = trigger.as_ref();
                    root.insert_before(&container, Some(first))?;
                }
                Orientation::Down => {
                    root.append_child(&container)?;
                }
            }
        }

        let owner = view.root.id.owner;
        self.registry.replace(owner, elements);
        self.rendered_expanded = self.select.is_expanded();
        Ok(())
    }

    fn apply(&self, response: &EventResponse, event: &web_sys::Event) {
        if response.prevent_default {
            event.prevent_default();
        }
        if let Some(focus) = response.focus {
            if let Some(element) = self.registry.element(focus) {
                if let Ok(element) = element.dyn_into::<HtmlElement>() {
                    let _ = element.focus();
                }
            }
        }
    }

    fn rerender(&mut self) {
        if let Err(err) = self.render() {
            tracing::warn!(?err, "select render failed");
        }
    }
}

fn option_button(document: &Document, node: &OptionNode<'_>) -> Result<Element, JsValue> {
    let button = document.create_element("button")?;
    button.set_attribute("type", "button")?;
    for (name, value) in node.attributes() {
        button.set_attribute(name, &value)?;
    }
    button.set_text_content(Some(node.label));
    Ok(button)
}

/// A [`Select`] rendered into the DOM.
///
/// Dropping it removes its element and listeners. The select itself, and
/// with it the document subscription, goes once the last handler releases
/// the shared state.
pub struct DomSelect<T> {
    id: WidgetId,
    state: Rc<RefCell<Mounted<T>>>,
    root: HtmlElement,
    registry: ElementRegistry,
    click: Closure<dyn FnMut(web_sys::Event)>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    _sync: Subscription,
}

impl<T: Clone + 'static> DomSelect<T> {
    /// Build a select from props and append it to `container`.
    pub fn mount(
        host: &DomHost,
        container: &Element,
        props: SelectProps<T>,
    ) -> Result<Self, JsValue> {
        let root: HtmlElement = host
            .document()
            .create_element("div")?
            .dyn_into()
            .map_err(|_| "Element is not an HtmlElement")?;
        container.append_child(&root)?;

        let mut select = Select::new(props)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .with_probe(ElementProbe::new(root.clone().into()));
        select.mount(host.listeners());
        let id = select.id();

        let state = Rc::new(RefCell::new(Mounted {
            select,
            document: host.document().clone(),
            root: root.clone(),
            registry: host.registry().clone(),
            rendered_expanded: false,
        }));
        state.borrow_mut().render()?;

        // Registered after the select's own listener, so it observes the
        // collapse an outside click causes.
        let sync = {
            let weak = Rc::downgrade(&state);
            host.listeners().subscribe(
                id,
                Box::new(move |target: Option<ElementRef>| {
                    if target.is_some_and(|t| t.is_owned_by(id)) {
                        return;
                    }
                    let Some(shared) = weak.upgrade() else {
                        return;
                    };
                    let Ok(mut mounted) = shared.try_borrow_mut() else {
                        return;
                    };
                    if mounted.rendered_expanded != mounted.select.is_expanded() {
                        mounted.rerender();
                    }
                }),
            )
        };

        let click: Closure<dyn FnMut(web_sys::Event)> = {
            let state = Rc::clone(&state);
            Closure::new(move |e: web_sys::Event| {
                let Ok(mut mounted) = state.try_borrow_mut() else {
                    return;
                };
                let event = click_event_to_selectkit(&e, &mounted.registry);
                let response = mounted.select.event(&event);
                if response.is_ignored() {
                    return;
                }
                mounted.apply(&response, &e);
                mounted.rerender();
            })
        };
        root.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;

        let keydown: Closure<dyn FnMut(KeyboardEvent)> = {
            let state = Rc::clone(&state);
            Closure::new(move |e: KeyboardEvent| {
                let Ok(mut mounted) = state.try_borrow_mut() else {
                    return;
                };
                let event = keyboard_event_to_selectkit(&e);
                let response = mounted.select.event(&event);
                mounted.apply(&response, &e);
            })
        };
        root.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;

        tracing::debug!(widget = %id, "select mounted in DOM");
        Ok(Self {
            id,
            state,
            root,
            registry: host.registry().clone(),
            click,
            keydown,
            _sync: sync,
        })
    }

    /// Label shown in the trigger.
    #[must_use]
    pub fn selected_label(&self) -> String {
        self.state.borrow().select.selected_label().to_string()
    }

    /// Selected value.
    #[must_use]
    pub fn selected_value(&self) -> T {
        self.state.borrow().select.selected_value().clone()
    }

    /// Check if the list is open.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.state.borrow().select.is_expanded()
    }

    /// Root element.
    #[must_use]
    pub fn root(&self) -> &HtmlElement {
        &self.root
    }
}

impl<T> Drop for DomSelect<T> {
    fn drop(&mut self) {
        let _ = self
            .root
            .remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref());
        let _ = self
            .root
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
        self.root.remove();
        self.registry.remove(self.id);
        tracing::debug!(widget = %self.id, "select unmounted from DOM");
    }
}

/// The fruit demo mounted in a page.
#[wasm_bindgen]
pub struct FruitDemo {
    select: DomSelect<Fruit>,
    _host: DomHost,
}

#[wasm_bindgen]
impl FruitDemo {
    /// Name of the selected fruit.
    pub fn selected_name(&self) -> String {
        self.select.selected_value().name
    }

    /// Label shown in the trigger.
    pub fn selected_label(&self) -> String {
        self.select.selected_label()
    }

    /// Check if the list is open.
    pub fn is_expanded(&self) -> bool {
        self.select.is_expanded()
    }
}

/// Mount the fruit demo into the element with id `container_id`.
#[wasm_bindgen]
pub fn mount_fruit_demo(container_id: &str) -> Result<FruitDemo, JsValue> {
    console_error_panic_hook::set_once();

    let host = DomHost::new()?;
    let container = host
        .document()
        .get_element_by_id(container_id)
        .ok_or_else(|| format!("Container '{container_id}' not found"))?;
    let select = DomSelect::mount(&host, &container, fruit_props())?;

    Ok(FruitDemo {
        select,
        _host: host,
    })
}
