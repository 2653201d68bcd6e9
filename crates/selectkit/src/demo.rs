//! Fruit picker demo.
//!
//! Four fruits, Kiwi preselected. Values are records identified by their
//! `id`, so a default built elsewhere still matches its option.

use selectkit_widgets::{Select, SelectError, SelectOption, SelectProps};
use serde::{Deserialize, Serialize};

/// A fruit record carried as an option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fruit {
    /// Stable identity
    pub id: String,
    /// Category
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name
    pub name: String,
}

impl Fruit {
    /// Create a fruit.
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: "fruit".to_string(),
            name: name.to_string(),
        }
    }
}

const FRUITS: [(&str, &str); 4] = [
    ("🍌", "Banana"),
    ("🍊", "Orange"),
    ("🥝", "Kiwi"),
    ("🍍", "Pineapple"),
];

/// The demo's options, labelled "Name emoji".
#[must_use]
pub fn fruit_options() -> Vec<SelectOption<Fruit>> {
    FRUITS
        .iter()
        .map(|(id, name)| SelectOption::new(format!("{name} {id}"), Fruit::new(id, name)))
        .collect()
}

/// The preselected fruit.
#[must_use]
pub fn kiwi() -> Fruit {
    Fruit::new("🥝", "Kiwi")
}

/// Props for the demo: compared by id, Kiwi preselected, changes logged.
#[must_use]
pub fn fruit_props() -> SelectProps<Fruit> {
    SelectProps::new(fruit_options())
        .compare_by_key(|fruit: &Fruit| fruit.id.clone())
        .default_option(kiwi())
        .on_change(log_fruit)
}

/// Build the demo select.
pub fn fruit_select() -> Result<Select<Fruit>, SelectError> {
    Select::new(fruit_props())
}

fn log_fruit(fruit: &Fruit) {
    let json = serde_json::to_string(fruit).unwrap_or_default();
    tracing::info!(id = %fruit.id, name = %fruit.name, "fruit selected");

    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&json));
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!(%json, "fruit value");
}
