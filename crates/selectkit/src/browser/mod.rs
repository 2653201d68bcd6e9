//! Browser runtime for selectkit.
//!
//! This module bridges the select widget and the DOM: key names, event
//! target resolution, and mounting selects into real elements.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod events;

// Cross-platform modules
pub mod keys;

#[cfg(target_arch = "wasm32")]
pub use dom::{mount_fruit_demo, DomHost, DomSelect, ElementProbe, FruitDemo};
#[cfg(target_arch = "wasm32")]
pub use events::ElementRegistry;
pub use keys::key_from_dom;
