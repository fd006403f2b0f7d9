//! Free-text input field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_dice::source::RandomSource;

use crate::component::{Component, ConstraintError, UiNode, kind_json};
use crate::registry::{ComponentRegistry, RegistryError, invalid};

use super::{compute_text, current_value, display_value, is_false};

pub const TAG: &str = "text-field";

/// A single-line text input bound to a property key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Initial value; may be a formula computed against the bag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

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
    let field: TextField = serde_json::from_value(value.clone()).map_err(|e| invalid(TAG, e))?;
    Ok(Box::new(field))
}

impl TextField {
    fn displayed(&self, bag: &Value, source: &mut dyn RandomSource) -> String {
        match current_value(bag, &self.key) {
            Some(value) => display_value(value),
            None => self
                .default_value
                .as_deref()
                .map(|d| compute_text(d, bag, source))
                .unwrap_or_default(),
        }
    }
}

impl Component for TextField {
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
        let mut node = UiNode::new("input")
            .key(self.key.clone())
            .value(self.displayed(bag, source))
            .css_class(&self.css_class);
        if let Some(label) = &self.label {
            node = node.text(label.clone());
        }
        node
    }

    fn extract(&self, form: &Value) -> Option<(String, Value)> {
        form.get(&self.key)
            .map(|value| (self.key.clone(), value.clone()))
    }

    fn validate(
        &self,
        value: Option<&Value>,
        _bag: &Value,
        _source: &mut dyn RandomSource,
    ) -> Result<(), ConstraintError> {
        if self.required {
            let empty = match value {
                None => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(Value::Null) => true,
                Some(_) => false,
            };
            if empty {
                return Err(ConstraintError::Required {
                    key: self.key.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vellum_dice::source::FixedRolls;

    use super::*;

    fn field(required: bool) -> TextField {
        TextField {
            key: "name".into(),
            label: Some("Name".into()),
            default_value: Some("Nameless".into()),
            size: None,
            css_class: None,
            required,
        }
    }

    #[test]
    fn renders_current_value_over_default() {
        let mut src = FixedRolls::new(vec![]);
        let node = field(false).render(&json!({ "name": "Mira" }), &mut src);
        assert_eq!(node.value.as_deref(), Some("Mira"));

        let node = field(false).render(&json!({}), &mut src);
        assert_eq!(node.value.as_deref(), Some("Nameless"));
    }

    #[test]
    fn extracts_submitted_value() {
        let form = json!({ "name": "Rook", "other": 1 });
        assert_eq!(
            field(false).extract(&form),
            Some(("name".to_string(), json!("Rook")))
        );
        assert_eq!(field(false).extract(&json!({})), None);
    }

    #[test]
    fn required_rejects_missing_and_empty() {
        let mut src = FixedRolls::new(vec![]);
        let bag = json!({});
        let f = field(true);
        assert!(f.validate(None, &bag, &mut src).is_err());
        assert!(f.validate(Some(&json!("")), &bag, &mut src).is_err());
        assert!(f.validate(Some(&json!("x")), &bag, &mut src).is_ok());
        assert!(field(false).validate(None, &bag, &mut src).is_ok());
    }
}
