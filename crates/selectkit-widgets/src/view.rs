//! Rendered surface of a [`Select`]: the nodes and attributes a host draws.
//!
//! The root is the listbox container. The trigger is the selected option and
//! is always visible. The list holds every other option and is present only
//! while the select is expanded.

use crate::placement::Orientation;
use crate::select::Select;
use selectkit_core::{AccessibleRole, ElementRef};
use serde::Serialize;

/// Attribute name/value pairs in render order.
pub type Attributes = Vec<(&'static str, String)>;

/// Listbox container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootNode {
    /// Element handle
    pub id: ElementRef,
    /// Always [`AccessibleRole::ListBox`]
    pub role: AccessibleRole,
    /// Whether the list is open
    pub expanded: bool,
    /// Element of the selected option
    pub active_descendant: ElementRef,
    /// Keyboard focusable only while open
    pub tab_index: i32,
}

impl RootNode {
    /// Markup attributes.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        vec![
            ("id", self.id.dom_id()),
            ("role", self.role.aria_role().to_string()),
            ("data-expanded", self.expanded.to_string()),
            ("aria-activedescendant", self.active_descendant.dom_id()),
            ("tabindex", self.tab_index.to_string()),
        ]
    }
}

/// One option element, either the trigger or a listed option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionNode<'a> {
    /// Element handle
    pub id: ElementRef,
    /// Display label
    pub label: &'a str,
    /// Always [`AccessibleRole::ListBoxOption`]
    pub role: AccessibleRole,
    /// True only for the trigger
    pub selected: bool,
    /// Navigable position; 0 for the trigger
    pub tab_index: i32,
    /// Root element the trigger controls. Trigger only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<ElementRef>,
    /// Expanded flag mirrored on the trigger. Trigger only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
}

impl OptionNode<'_> {
    /// Markup attributes.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attrs = vec![
            ("id", self.id.dom_id()),
            ("role", self.role.aria_role().to_string()),
            ("aria-selected", self.selected.to_string()),
            ("tabindex", self.tab_index.to_string()),
        ];
        if let Some(controls) = self.controls {
            attrs.push(("aria-controls", controls.dom_id()));
        }
        if let Some(expanded) = self.expanded {
            attrs.push(("aria-expanded", expanded.to_string()));
        }
        attrs
    }
}

/// Open option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListNode<'a> {
    /// Presentation only
    pub orientation: Orientation,
    /// Every option except the selected one, in original order
    pub options: Vec<OptionNode<'a>>,
}

impl ListNode<'_> {
    /// Markup attributes.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        vec![("data-orientation", self.orientation.as_str().to_string())]
    }
}

/// Snapshot of everything a select renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectView<'a> {
    /// Listbox container
    pub root: RootNode,
    /// Selected option, always visible
    pub trigger: OptionNode<'a>,
    /// Present only while expanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<ListNode<'a>>,
}

impl<'a> SelectView<'a> {
    /// Build the view of a select in its current state.
    #[must_use]
    pub fn of<T: 'static>(select: &'a Select<T>) -> Self {
        let expanded = select.is_expanded();
        let selected = select.selected_index();
        let trigger_id = select.element(selected);
        let root_id = select.root_element();

        let root = RootNode {
            id: root_id,
            role: AccessibleRole::ListBox,
            expanded,
            active_descendant: trigger_id,
            tab_index: if expanded { 0 } else { -1 },
        };

        let trigger = OptionNode {
            id: trigger_id,
            label: select.selected_label(),
            role: AccessibleRole::ListBoxOption,
            selected: true,
            tab_index: 0,
            controls: Some(root_id),
            expanded: Some(expanded),
        };

        let list = expanded.then(|| {
            let order = select.navigation_order();
            let options = select
                .options()
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != selected)
                .map(|(index, option)| OptionNode {
                    id: select.element(index),
                    label: &option.label,
                    role: AccessibleRole::ListBoxOption,
                    selected: false,
                    tab_index: order
                        .position_of(index)
                        .map_or(-1, |p| i32::try_from(p).unwrap_or(i32::MAX)),
                    controls: None,
                    expanded: None,
                })
                .collect();
            ListNode {
                orientation: select.orientation(),
                options,
            }
        });

        Self {
            root,
            trigger,
            list,
        }
    }

    /// Labels of the options shown in the open list, empty while collapsed.
    #[must_use]
    pub fn listed_labels(&self) -> Vec<&'a str> {
        self.list
            .as_ref()
            .map(|list| list.options.iter().map(|o| o.label).collect())
            .unwrap_or_default()
    }

    /// Every visible option node, trigger first.
    pub fn visible_options(&self) -> impl Iterator<Item = &OptionNode<'a>> {
        std::iter::once(&self.trigger).chain(self.list.iter().flat_map(|l| l.options.iter()))
    }
}
