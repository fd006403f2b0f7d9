//! The component capability interface and render tree.

use serde::Serialize;
use serde_json::Value;

use vellum_dice::source::RandomSource;
use vellum_formula::phrase::Computed;

/// Constraint violations reported by [`Component::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstraintError {
    #[error("value for '{key}' is required")]
    Required { key: String },

    #[error("value for '{key}' must be a number")]
    NotNumeric { key: String },

    #[error("value for '{key}' must be at least {min}")]
    BelowMin { key: String, min: f64 },

    #[error("value for '{key}' must be at most {max}")]
    AboveMax { key: String, max: f64 },

    #[error("value for '{key}' is not one of the available options")]
    NotAnOption { key: String },
}

/// A host-agnostic render tree node.
///
/// The host shell translates these into its own widgets; the engine only
/// describes structure, text, and styling hooks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiNode {
    /// Element kind: `label`, `input`, `checkbox`, `select`, `option`,
    /// `button`, `panel`, `table`, `row`.
    pub element: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(rename = "cssClass", skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UiNode>,
}

impl UiNode {
    /// Create a node of the given element kind.
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            key: None,
            text: None,
            value: None,
            css_class: None,
            children: Vec::new(),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.is_empty() {
            self.key = Some(key);
        }
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn css_class(mut self, class: &Option<String>) -> Self {
        self.css_class = class.clone();
        self
    }

    pub fn children(mut self, children: Vec<UiNode>) -> Self {
        self.children = children;
        self
    }
}

/// A live sheet component instantiated from a descriptor.
pub trait Component {
    /// The registered `type` tag of this component.
    fn type_tag(&self) -> &'static str;

    /// The property key this component reads and writes, empty for purely
    /// presentational components.
    fn key(&self) -> &str;

    /// Serialize back to descriptor JSON. Round-trip invariant:
    /// instantiating the returned JSON yields a behaviorally identical
    /// component.
    fn to_json(&self) -> Value;

    /// Render against a bag into a UI tree. Formulas embedded in the
    /// component's configuration are computed here.
    fn render(&self, bag: &Value, source: &mut dyn RandomSource) -> UiNode;

    /// Extract this component's value from a submitted form payload.
    /// Returns the property key and the value to store, or `None` when the
    /// form holds nothing for this component.
    fn extract(&self, form: &Value) -> Option<(String, Value)>;

    /// Validate a submitted value against this component's constraints.
    /// Formula-valued constraints are evaluated against `bag`.
    fn validate(
        &self,
        value: Option<&Value>,
        bag: &Value,
        source: &mut dyn RandomSource,
    ) -> Result<(), ConstraintError>;

    /// Activate the component (a roll button posting its formula).
    /// Non-interactive components return `None`.
    fn activate(&self, _bag: &Value, _source: &mut dyn RandomSource) -> Option<Computed> {
        None
    }

    /// Collect extracted values from this component and any children.
    /// Containers override this to recurse.
    fn collect_extracts(&self, form: &Value, out: &mut Vec<(String, Value)>) {
        if let Some(pair) = self.extract(form) {
            out.push(pair);
        }
    }
}

/// Serialize a kind struct and stamp its `type` tag into the object.
pub(crate) fn kind_json<T: Serialize>(kind: &T, tag: &str) -> Value {
    match serde_json::to_value(kind) {
        Ok(Value::Object(mut map)) => {
            map.insert("type".to_string(), Value::String(tag.to_string()));
            Value::Object(map)
        }
        _ => serde_json::json!({ "type": tag }),
    }
}
