//! Repeating-row container bound to an array property.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_dice::source::RandomSource;

use crate::component::{Component, ConstraintError, UiNode, kind_json};
use crate::registry::{ComponentRegistry, RegistryError, invalid};

use super::current_value;

pub const TAG: &str = "table";

/// A dynamic table. The bound property is an array of row objects; each
/// column descriptor renders and validates against one row at a time.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableField {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,

    /// Column component descriptors, kept verbatim for serialization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Value>,

    #[serde(skip)]
    column_components: Vec<Box<dyn Component>>,
}

pub fn from_json(
    value: &Value,
    registry: &ComponentRegistry,
) -> Result<Box<dyn Component>, RegistryError> {
    let mut table: TableField =
        serde_json::from_value(value.clone()).map_err(|e| invalid(TAG, e))?;
    table.column_components = table
        .columns
        .iter()
        .map(|descriptor| registry.instantiate(descriptor))
        .collect::<Result<_, _>>()?;
    Ok(Box::new(table))
}

impl TableField {
    fn rows<'a>(&self, bag: &'a Value) -> &'a [Value] {
        current_value(bag, &self.key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Component for TableField {
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
        let rows = self
            .rows(bag)
            .iter()
            .map(|row| {
                let cells = self
                    .column_components
                    .iter()
                    .map(|column| column.render(row, source))
                    .collect();
                UiNode::new("row").children(cells)
            })
            .collect();
        let mut node = UiNode::new("table")
            .key(self.key.clone())
            .css_class(&self.css_class)
            .children(rows);
        if let Some(label) = &self.label {
            node = node.text(label.clone());
        }
        node
    }

    fn extract(&self, form: &Value) -> Option<(String, Value)> {
        let submitted = form.get(&self.key)?.as_array()?;
        let rows: Vec<Value> = submitted
            .iter()
            .map(|row| {
                let mut cleaned = serde_json::Map::new();
                for column in &self.column_components {
                    if let Some((key, value)) = column.extract(row) {
                        cleaned.insert(key, value);
                    }
                }
                Value::Object(cleaned)
            })
            .collect();
        Some((self.key.clone(), Value::Array(rows)))
    }

    fn validate(
        &self,
        value: Option<&Value>,
        _bag: &Value,
        source: &mut dyn RandomSource,
    ) -> Result<(), ConstraintError> {
        let Some(rows) = value.and_then(Value::as_array) else {
            return Ok(());
        };
        for row in rows {
            for column in &self.column_components {
                let cell = row.get(column.key());
                column.validate(cell, row, source)?;
            }
        }
        Ok(())
    }
}
