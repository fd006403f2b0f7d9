//! Selection field with static or property-driven options.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_dice::source::RandomSource;

use crate::component::{Component, ConstraintError, UiNode, kind_json};
use crate::registry::{ComponentRegistry, RegistryError, invalid};

use super::{current_value, display_value};

pub const TAG: &str = "dropdown";

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

/// A select bound to a property key. Options come from the static list,
/// from an array property named by `optionsFrom`, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dropdown {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<DropdownOption>,

    /// Property path to an array of strings or `{value, label}` objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_from: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
}

pub fn from_json(
    value: &Value,
    _registry: &ComponentRegistry,
) -> Result<Box<dyn Component>, RegistryError> {
    let field: Dropdown = serde_json::from_value(value.clone()).map_err(|e| invalid(TAG, e))?;
    Ok(Box::new(field))
}

impl Dropdown {
    /// The full option list for a given bag.
    fn resolved_options(&self, bag: &Value) -> Vec<DropdownOption> {
        let mut options = self.options.clone();
        if let Some(path) = &self.options_from {
            if let Some(Value::Array(items)) = current_value(bag, path) {
                for item in items {
                    match item {
                        Value::Object(map) => {
                            let value = map.get("value").map(display_value).unwrap_or_default();
                            let label = map
                                .get("label")
                                .map(display_value)
                                .unwrap_or_else(|| value.clone());
                            options.push(DropdownOption { value, label });
                        }
                        other => {
                            let value = display_value(other);
                            options.push(DropdownOption {
                                label: value.clone(),
                                value,
                            });
                        }
                    }
                }
            }
        }
        options
    }
}

impl Component for Dropdown {
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
        let selected = current_value(bag, &self.key)
            .map(display_value)
            .or_else(|| self.default_value.clone())
            .unwrap_or_default();
        let children = self
            .resolved_options(bag)
            .into_iter()
            .map(|opt| UiNode::new("option").value(opt.value).text(opt.label))
            .collect();
        let mut node = UiNode::new("select")
            .key(self.key.clone())
            .value(selected)
            .css_class(&self.css_class)
            .children(children);
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
        bag: &Value,
        _source: &mut dyn RandomSource,
    ) -> Result<(), ConstraintError> {
        let Some(value) = value else {
            return Ok(());
        };
        let submitted = display_value(value);
        let allowed = self
            .resolved_options(bag)
            .iter()
            .any(|opt| opt.value == submitted);
        if allowed {
            Ok(())
        } else {
            Err(ConstraintError::NotAnOption {
                key: self.key.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vellum_dice::source::FixedRolls;

    use super::*;

    fn dropdown() -> Dropdown {
        Dropdown {
            key: "stance".into(),
            label: None,
            default_value: Some("guard".into()),
            options: vec![
                DropdownOption { value: "guard".into(), label: "Guard".into() },
                DropdownOption { value: "strike".into(), label: "Strike".into() },
            ],
            options_from: None,
            css_class: None,
        }
    }

    #[test]
    fn renders_options_and_selection() {
        let mut src = FixedRolls::new(vec![]);
        let node = dropdown().render(&json!({ "stance": "strike" }), &mut src);
        assert_eq!(node.element, "select");
        assert_eq!(node.value.as_deref(), Some("strike"));
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].text.as_deref(), Some("Guard"));
    }

    #[test]
    fn options_from_bag_property() {
        let mut d = dropdown();
        d.options = Vec::new();
        d.options_from = Some("stances".into());
        let bag = json!({ "stances": ["guard", "strike", "feint"] });
        let opts = d.resolved_options(&bag);
        assert_eq!(opts.len(), 3);
        assert_eq!(opts[2].value, "feint");
    }

    #[test]
    fn validate_rejects_unknown_option() {
        let mut src = FixedRolls::new(vec![]);
        let bag = json!({});
        let d = dropdown();
        assert!(d.validate(Some(&json!("guard")), &bag, &mut src).is_ok());
        assert_eq!(
            d.validate(Some(&json!("flee")), &bag, &mut src),
            Err(ConstraintError::NotAnOption { key: "stance".into() })
        );
        assert!(d.validate(None, &bag, &mut src).is_ok());
    }

    #[test]
    fn round_trip() {
        let raw = json!({
            "type": "dropdown",
            "key": "stance",
            "defaultValue": "guard",
            "options": [
                { "value": "guard", "label": "Guard" },
                { "value": "strike", "label": "Strike" }
            ]
        });
        let registry = ComponentRegistry::with_builtins();
        let component = registry.instantiate(&raw).unwrap();
        assert_eq!(component.to_json(), raw);
    }
}
