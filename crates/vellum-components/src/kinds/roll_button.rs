//! Button that computes a formula when activated.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_dice::source::RandomSource;
use vellum_formula::phrase::{ComputeOptions, Computed, compute};

use crate::component::{Component, ConstraintError, UiNode, kind_json};
use crate::registry::{ComponentRegistry, RegistryError, invalid};

pub const TAG: &str = "roll-button";

/// A clickable roll. Activation computes the formula with an explanation;
/// the host posts the result wherever it wants (chat, log, tooltip).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollButton {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The formula computed on activation, e.g. `"${1d20 + str}$"`.
    pub formula: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
}

pub fn from_json(
    value: &Value,
    _registry: &ComponentRegistry,
) -> Result<Box<dyn Component>, RegistryError> {
    let button: RollButton = serde_json::from_value(value.clone()).map_err(|e| invalid(TAG, e))?;
    Ok(Box::new(button))
}

impl Component for RollButton {
    fn type_tag(&self) -> &'static str {
        TAG
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn to_json(&self) -> Value {
        kind_json(self, TAG)
    }

    fn render(&self, _bag: &Value, _source: &mut dyn RandomSource) -> UiNode {
        // The formula computes on activation, not on render.
        UiNode::new("button")
            .key(self.key.clone())
            .text(self.label.clone().unwrap_or_else(|| self.formula.clone()))
            .css_class(&self.css_class)
    }

    fn extract(&self, _form: &Value) -> Option<(String, Value)> {
        None
    }

    fn validate(
        &self,
        _value: Option<&Value>,
        _bag: &Value,
        _source: &mut dyn RandomSource,
    ) -> Result<(), ConstraintError> {
        Ok(())
    }

    fn activate(&self, bag: &Value, source: &mut dyn RandomSource) -> Option<Computed> {
        let options = ComputeOptions {
            explain: true,
            ..Default::default()
        };
        Some(compute(&self.formula, bag, source, &options))
    }
}
