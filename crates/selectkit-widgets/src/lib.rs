//! Dropdown select widget for the selectkit UI toolkit.

mod error;
mod manifest;
pub mod navigation;
pub mod placement;
pub mod select;
pub mod view;

pub use error::{ManifestError, SelectError};
pub use manifest::SelectManifest;
pub use navigation::NavigationOrder;
pub use placement::{LayoutProbe, Orientation, StaticProbe};
pub use select::{
    ChangeCallback, Select, SelectOption, SelectProps, SelectToggled, SelectionChanged, ValueEq,
};
pub use view::{Attributes, ListNode, OptionNode, RootNode, SelectView};
