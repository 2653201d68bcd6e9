//! selectkit: an accessible dropdown select widget.
//!
//! The state machine lives in [`widgets::Select`]; this crate re-exports it
//! together with the core types, a small fruit demo and a browser host.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { mount_fruit_demo } from './selectkit.js';
//!
//! async function main() {
//!     await init();
//!     const demo = mount_fruit_demo('app');
//!     console.log(demo.selected_name());
//! }
//! ```
//!
//! # Native Usage
//!
//! ```
//! use selectkit::{Event, Select, SelectOption, SelectProps, Widget};
//!
//! let options = vec![SelectOption::new("Tea", "tea"), SelectOption::new("Coffee", "coffee")];
//! let mut select = Select::new(SelectProps::new(options)).unwrap();
//!
//! let trigger = select.element(select.selected_index());
//! select.event(&Event::click(trigger));
//! assert!(select.is_expanded());
//! ```

pub use selectkit_core::*;
pub use selectkit_widgets as widgets;
pub use selectkit_widgets::{
    LayoutProbe, ManifestError, NavigationOrder, Orientation, Select, SelectError,
    SelectManifest, SelectOption, SelectProps, SelectToggled, SelectView, SelectionChanged,
};

pub mod browser;
pub mod demo;

#[cfg(target_arch = "wasm32")]
pub use browser::{mount_fruit_demo, DomHost, DomSelect, FruitDemo};
