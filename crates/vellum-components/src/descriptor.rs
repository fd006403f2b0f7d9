//! The descriptor envelope: fields common to every component type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The common shape of any component descriptor, with type-specific fields
/// preserved in `extra`. Used for template inspection and listings; the
/// registry hands the full JSON to the concrete kind for instantiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Registered component type tag.
    #[serde(rename = "type")]
    pub kind: String,

    /// Property key, empty for presentational components.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, rename = "cssClass", skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,

    /// Type-specific fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Descriptor {
    /// Parse the envelope from descriptor JSON.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
