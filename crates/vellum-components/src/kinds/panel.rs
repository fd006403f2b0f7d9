//! Container grouping nested components.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_dice::source::RandomSource;

use crate::component::{Component, ConstraintError, UiNode, kind_json};
use crate::registry::{ComponentRegistry, RegistryError, invalid};

use super::compute_text;

pub const TAG: &str = "panel";

/// A layout container. Children are full component descriptors and are
/// instantiated eagerly, so a broken nested descriptor fails the panel.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,

    /// Heading text; may embed formulas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Layout hint for the host: `vertical`, `horizontal`, `grid-2`...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,

    /// Child component descriptors, kept verbatim for serialization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Value>,

    #[serde(skip)]
    children: Vec<Box<dyn Component>>,
}

pub fn from_json(
    value: &Value,
    registry: &ComponentRegistry,
) -> Result<Box<dyn Component>, RegistryError> {
    let mut panel: Panel = serde_json::from_value(value.clone()).map_err(|e| invalid(TAG, e))?;
    panel.children = panel
        .components
        .iter()
        .map(|descriptor| registry.instantiate(descriptor))
        .collect::<Result<_, _>>()?;
    Ok(Box::new(panel))
}

impl Component for Panel {
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
        let children = self
            .children
            .iter()
            .map(|child| child.render(bag, source))
            .collect();
        let class = match (&self.layout, &self.css_class) {
            (Some(layout), Some(css)) => Some(format!("{} {}", layout, css)),
            (Some(layout), None) => Some(layout.clone()),
            (None, css) => css.clone(),
        };
        let mut node = UiNode::new("panel")
            .key(self.key.clone())
            .css_class(&class)
            .children(children);
        if let Some(label) = &self.label {
            node = node.text(compute_text(label, bag, source));
        }
        node
    }

    fn extract(&self, _form: &Value) -> Option<(String, Value)> {
        // Containers own no value of their own.
        None
    }

    fn validate(
        &self,
        value: Option<&Value>,
        bag: &Value,
        source: &mut dyn RandomSource,
    ) -> Result<(), ConstraintError> {
        // `value` is the submitted form object; each child picks its own key.
        for child in &self.children {
            let child_value = value.and_then(|form| form.get(child.key()));
            child.validate(child_value, bag, source)?;
        }
        Ok(())
    }

    fn collect_extracts(&self, form: &Value, out: &mut Vec<(String, Value)>) {
        for child in &self.children {
            child.collect_extracts(form, out);
        }
    }
}
