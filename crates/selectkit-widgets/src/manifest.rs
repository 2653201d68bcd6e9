//! Declarative select descriptions loaded from JSON or YAML.

use crate::error::ManifestError;
use crate::select::{Select, SelectOption, SelectProps};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Serializable description of a select.
///
/// ```yaml
/// options:
///   - label: Banana
///     value: banana
///   - label: Kiwi
///     value: kiwi
/// default: kiwi
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SelectManifest<T> {
    /// Options in display order
    pub options: Vec<SelectOption<T>>,
    /// Initially selected value
    #[serde(default)]
    pub default: Option<T>,
}

impl<T: DeserializeOwned> SelectManifest<T> {
    /// Parse a manifest from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a manifest from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}

impl<T: Serialize> SelectManifest<T> {
    /// Serialize manifest to YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

impl<T: PartialEq + 'static> SelectManifest<T> {
    /// Convert into construction parameters compared with `PartialEq`.
    #[must_use]
    pub fn into_props(self) -> SelectProps<T> {
        let props = SelectProps::new(self.options);
        match self.default {
            Some(default) => props.default_option(default),
            None => props,
        }
    }

    /// Build a select, validating options and default.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Invalid`] if the select cannot be built.
    pub fn build(self) -> Result<Select<T>, ManifestError> {
        Ok(Select::new(self.into_props())?)
    }
}
