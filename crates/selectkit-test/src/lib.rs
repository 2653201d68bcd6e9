//! Testing harness for selectkit widgets.
//!
//! ```
//! use selectkit_test::Harness;
//! use selectkit_widgets::{SelectOption, SelectProps};
//!
//! let options = vec![SelectOption::new("Tea", 1), SelectOption::new("Coffee", 2)];
//! let mut h = Harness::new(SelectProps::new(options)).unwrap();
//! h.click_trigger();
//! assert!(h.click_option("Coffee"));
//! assert_eq!(h.changes(), vec![2]);
//! ```

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

mod harness;

pub use harness::Harness;
