//! Static or formula-driven text display.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_dice::source::RandomSource;
use vellum_formula::phrase::{ComputeOptions, Computed, compute};

use crate::component::{Component, ConstraintError, UiNode, kind_json};
use crate::registry::{ComponentRegistry, RegistryError, invalid};

use super::compute_text;

pub const TAG: &str = "label";

/// A read-only text element. `text` may embed `${...}$` formulas, computed
/// at render time against the entity's bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,

    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,

    /// When set, clicking the label recomputes `text` as a roll.
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub rollable: bool,
}

pub fn from_json(
    value: &Value,
    _registry: &ComponentRegistry,
) -> Result<Box<dyn Component>, RegistryError> {
    let label: Label = serde_json::from_value(value.clone()).map_err(|e| invalid(TAG, e))?;
    Ok(Box::new(label))
}

impl Component for Label {
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
        UiNode::new("label")
            .key(self.key.clone())
            .text(compute_text(&self.text, bag, source))
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
        if !self.rollable {
            return None;
        }
        let options = ComputeOptions {
            explain: true,
            ..Default::default()
        };
        Some(compute(&self.text, bag, source, &options))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vellum_dice::source::FixedRolls;

    use super::*;

    #[test]
    fn renders_computed_text() {
        let label = Label {
            key: String::new(),
            text: "HP: ${hp}$".into(),
            css_class: Some("stat".into()),
            rollable: false,
        };
        let node = label.render(&json!({ "hp": 12 }), &mut FixedRolls::new(vec![]));
        assert_eq!(node.element, "label");
        assert_eq!(node.text.as_deref(), Some("HP: 12"));
        assert_eq!(node.css_class.as_deref(), Some("stat"));
    }

    #[test]
    fn rollable_label_activates() {
        let label = Label {
            key: String::new(),
            text: "${2d6}$".into(),
            css_class: None,
            rollable: true,
        };
        let out = label
            .activate(&json!({}), &mut FixedRolls::new(vec![3, 4]))
            .unwrap();
        assert_eq!(out.result, "7");

        let plain = Label { rollable: false, ..label };
        assert!(plain.activate(&json!({}), &mut FixedRolls::new(vec![])).is_none());
    }

    #[test]
    fn round_trip() {
        let raw = json!({ "type": "label", "text": "Title", "cssClass": "big" });
        let registry = ComponentRegistry::with_builtins();
        let component = registry.instantiate(&raw).unwrap();
        assert_eq!(component.to_json(), raw);
    }
}
