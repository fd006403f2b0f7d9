//! Boolean toggle field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_dice::source::RandomSource;

use crate::component::{Component, ConstraintError, UiNode, kind_json};
use crate::registry::{ComponentRegistry, RegistryError, invalid};

use super::{current_value, is_false};

pub const TAG: &str = "checkbox";

/// A checkbox bound to a boolean property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkbox {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub default_value: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
}

pub fn from_json(
    value: &Value,
    _registry: &ComponentRegistry,
) -> Result<Box<dyn Component>, RegistryError> {
    let field: Checkbox = serde_json::from_value(value.clone()).map_err(|e| invalid(TAG, e))?;
    Ok(Box::new(field))
}

/// Checkbox truthiness for stored values of any type.
fn is_checked(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty() && s != "false" && s != "0",
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => false,
    }
}

impl Component for Checkbox {
    fn type_tag(&self) -> &'static str {
        TAG
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn to_json(&self) -> Value {
        kind_json(self, TAG)
    }

    fn render(&self, bag: &Value, _source: &mut dyn RandomSource) -> UiNode {
        let checked = current_value(bag, &self.key)
            .map(is_checked)
            .unwrap_or(self.default_value);
        let mut node = UiNode::new("checkbox")
            .key(self.key.clone())
            .value(checked.to_string())
            .css_class(&self.css_class);
        if let Some(label) = &self.label {
            node = node.text(label.clone());
        }
        node
    }

    fn extract(&self, form: &Value) -> Option<(String, Value)> {
        form.get(&self.key)
            .map(|value| (self.key.clone(), Value::Bool(is_checked(value))))
    }

    fn validate(
        &self,
        _value: Option<&Value>,
        _bag: &Value,
        _source: &mut dyn RandomSource,
    ) -> Result<(), ConstraintError> {
        // Any submitted value coerces to a boolean.
        Ok(())
    }
}
