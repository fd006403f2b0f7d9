//! Numeric input field with min/max constraints.
//!
//! Bounds may be literal numbers or formula strings resolved against the
//! entity's bag at validation time, so a field can express "no higher than
//! `${level * 10}$`".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_dice::source::RandomSource;

use crate::component::{Component, ConstraintError, UiNode, kind_json};
use crate::registry::{ComponentRegistry, RegistryError, invalid};

use super::{coerce_number, compute_text, current_value, display_value, is_false, numeric_bound};

pub const TAG: &str = "number-field";

/// A numeric input bound to a property key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberField {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    /// Lower bound: a number or a formula string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,

    /// Upper bound: a number or a formula string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

pub fn from_json(
    value: &Value,
    _registry: &ComponentRegistry,
) -> Result<Box<dyn Component>, RegistryError> {
    let field: NumberField = serde_json::from_value(value.clone()).map_err(|e| invalid(TAG, e))?;
    Ok(Box::new(field))
}

impl Component for NumberField {
    fn type_tag(&self) -> &'static str {
        TAG
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn to_json(&self) -> Value {
        kind_json(self, TAG)
    }

    fn render(&self, bag: &Value, source: &mut dyn RandomSource) -> UiNode {
        let displayed = match current_value(bag, &self.key) {
            Some(value) => display_value(value),
            None => match &self.default_value {
                Some(Value::String(s)) => compute_text(s, bag, source),
                Some(other) => display_value(other),
                None => String::new(),
            },
        };
        let mut node = UiNode::new("input")
            .key(self.key.clone())
            .value(displayed)
            .css_class(&self.css_class);
        if let Some(label) = &self.label {
            node = node.text(label.clone());
        }
        node
    }

    fn extract(&self, form: &Value) -> Option<(String, Value)> {
        let value = form.get(&self.key)?;
        // Numeric strings are stored as numbers.
        let stored = match coerce_number(value) {
            Some(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or_else(|| value.clone()),
            None => value.clone(),
        };
        Some((self.key.clone(), stored))
    }

    fn validate(
        &self,
        value: Option<&Value>,
        bag: &Value,
        source: &mut dyn RandomSource,
    ) -> Result<(), ConstraintError> {
        let Some(value) = value else {
            if self.required {
                return Err(ConstraintError::Required {
                    key: self.key.clone(),
                });
            }
            return Ok(());
        };

        let n = coerce_number(value).ok_or_else(|| ConstraintError::NotNumeric {
            key: self.key.clone(),
        })?;

        if let Some(min) = numeric_bound(self.min.as_ref(), bag, source) {
            if n < min {
                return Err(ConstraintError::BelowMin {
                    key: self.key.clone(),
                    min,
                });
            }
        }
        if let Some(max) = numeric_bound(self.max.as_ref(), bag, source) {
            if n > max {
                return Err(ConstraintError::AboveMax {
                    key: self.key.clone(),
                    max,
                });
            }
        }
        Ok(())
    }
}
