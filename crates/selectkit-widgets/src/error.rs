//! Error types for selectkit-widgets.

use thiserror::Error;

/// Construction-time contract violations of a [`Select`](crate::Select).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// A select needs something to show in its trigger.
    #[error("select requires at least one option")]
    NoOptions,

    /// The default value compares unequal to every option.
    #[error("default value does not match any of the {count} options")]
    DefaultNotFound {
        /// Number of options searched
        count: usize,
    },

    /// Two options compare equal, so a selection would be ambiguous.
    #[error("options {first} and {second} have equal values")]
    DuplicateValue {
        /// Index of the first option
        first: usize,
        /// Index of the option equal to it
        second: usize,
    },

    /// Replacement options no longer contain the current selection.
    #[error("current selection is not present in the replacement options")]
    SelectionNotFound,
}

/// Errors loading a [`SelectManifest`](crate::SelectManifest).
#[derive(Debug, Error)]
pub enum ManifestError {
    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The manifest parsed but describes an invalid select.
    #[error("invalid select: {0}")]
    Invalid(#[from] SelectError),
}
