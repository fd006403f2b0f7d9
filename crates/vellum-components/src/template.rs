//! Sheet template documents: parsing, checking, rendering.
//!
//! Templates are authored as JSON or TOML (auto-detected by extension) and
//! hold sections of component descriptors. `check` instantiates every
//! descriptor and is the designer-facing lint: any unknown type or invalid
//! shape surfaces with its section name.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vellum_dice::source::RandomSource;

use crate::component::{Component, UiNode};
use crate::registry::{ComponentRegistry, RegistryError};

/// Errors from template parsing and instantiation.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("in section '{section}': {source}")]
    Component {
        section: String,
        #[source]
        source: RegistryError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named group of components on a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub label: String,

    #[serde(default)]
    pub components: Vec<Value>,
}

/// Root structure for `.sheet.json` / `.sheet.toml` files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetTemplate {
    /// Unique identifier / name for this template.
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub sections: Vec<TemplateSection>,
}

/// Parse a template from a JSON string.
pub fn parse_json(content: &str) -> Result<SheetTemplate, TemplateError> {
    serde_json::from_str(content).map_err(|e| TemplateError::Parse(e.to_string()))
}

/// Parse a template from a TOML string.
pub fn parse_toml(content: &str) -> Result<SheetTemplate, TemplateError> {
    toml::from_str(content).map_err(|e| TemplateError::Parse(e.to_string()))
}

/// Load a template from a file path (auto-detect TOML vs JSON by extension).
pub fn load_template(path: &Path) -> Result<SheetTemplate, TemplateError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content),
        Some("json") => parse_json(&content),
        _ => {
            // Try JSON first, then TOML.
            parse_json(&content).or_else(|_| parse_toml(&content))
        }
    }
}

impl SheetTemplate {
    /// Instantiate every component, grouped by section.
    pub fn instantiate(
        &self,
        registry: &ComponentRegistry,
    ) -> Result<Vec<(String, Vec<Box<dyn Component>>)>, TemplateError> {
        self.sections
            .iter()
            .map(|section| {
                let components = section
                    .components
                    .iter()
                    .map(|descriptor| {
                        registry.instantiate(descriptor).map_err(|source| {
                            TemplateError::Component {
                                section: section.label.clone(),
                                source,
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((section.label.clone(), components))
            })
            .collect()
    }

    /// Instantiate everything and return the component count. The template
    /// analogue of a lint pass.
    pub fn check(&self, registry: &ComponentRegistry) -> Result<usize, TemplateError> {
        let sections = self.instantiate(registry)?;
        Ok(sections.iter().map(|(_, components)| components.len()).sum())
    }

    /// Render the whole sheet against a bag.
    pub fn render(
        &self,
        registry: &ComponentRegistry,
        bag: &Value,
        source: &mut dyn RandomSource,
    ) -> Result<UiNode, TemplateError> {
        let sections = self
            .instantiate(registry)?
            .into_iter()
            .map(|(label, components)| {
                let children = components
                    .iter()
                    .map(|component| component.render(bag, source))
                    .collect();
                UiNode::new("panel").text(label).children(children)
            })
            .collect();
        Ok(UiNode::new("sheet").text(self.name.clone()).children(sections))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;
    use vellum_dice::source::FixedRolls;

    use super::*;

    #[test]
    fn parse_json_minimal() {
        let raw = r#"{
            "name": "fighter",
            "sections": [
                { "label": "Vitals", "components": [{ "type": "number-field", "key": "hp" }] }
            ]
        }"#;
        let template = parse_json(raw).unwrap();
        assert_eq!(template.name, "fighter");
        assert_eq!(template.sections.len(), 1);
        assert_eq!(template.sections[0].components.len(), 1);
    }

    #[test]
    fn parse_toml_with_sections() {
        let raw = r#"
name = "rogue"
description = "Sneaky sheet"

[[sections]]
label = "Vitals"

[[sections.components]]
type = "number-field"
key = "hp"
min = 0

[[sections.components]]
type = "roll-button"
key = "sneak"
label = "Sneak Attack"
formula = "${2d6}$"
"#;
        let template = parse_toml(raw).unwrap();
        assert_eq!(template.name, "rogue");
        assert_eq!(template.sections[0].components.len(), 2);
        assert_eq!(
            template.sections[0].components[1].get("formula"),
            Some(&json!("${2d6}$"))
        );
    }

    #[test]
    fn load_auto_detects_by_extension() {
        let tmp = TempDir::new().unwrap();
        let json_path = tmp.path().join("a.sheet.json");
        std::fs::write(&json_path, r#"{ "name": "a" }"#).unwrap();
        assert_eq!(load_template(&json_path).unwrap().name, "a");

        let toml_path = tmp.path().join("b.toml");
        std::fs::write(&toml_path, "name = \"b\"\n").unwrap();
        assert_eq!(load_template(&toml_path).unwrap().name, "b");
    }

    #[test]
    fn check_counts_components() {
        let template = SheetTemplate {
            name: "t".into(),
            description: String::new(),
            sections: vec![TemplateSection {
                label: "Main".into(),
                components: vec![
                    json!({ "type": "text-field", "key": "name" }),
                    json!({ "type": "checkbox", "key": "ready" }),
                ],
            }],
        };
        let registry = ComponentRegistry::with_builtins();
        assert_eq!(template.check(&registry).unwrap(), 2);
    }

    #[test]
    fn check_reports_section_of_broken_component() {
        let template = SheetTemplate {
            name: "t".into(),
            description: String::new(),
            sections: vec![TemplateSection {
                label: "Gear".into(),
                components: vec![json!({ "type": "hologram" })],
            }],
        };
        let registry = ComponentRegistry::with_builtins();
        let err = template.check(&registry).unwrap_err();
        assert!(err.to_string().contains("Gear"), "got: {}", err);
        assert!(err.to_string().contains("hologram") || format!("{:?}", err).contains("hologram"));
    }

    #[test]
    fn render_whole_sheet() {
        let template = SheetTemplate {
            name: "fighter".into(),
            description: String::new(),
            sections: vec![TemplateSection {
                label: "Vitals".into(),
                components: vec![
                    json!({ "type": "label", "text": "HP: ${hp}$" }),
                    json!({ "type": "number-field", "key": "hp" }),
                ],
            }],
        };
        let registry = ComponentRegistry::with_builtins();
        let bag = json!({ "hp": 12 });
        let node = template
            .render(&registry, &bag, &mut FixedRolls::new(vec![]))
            .unwrap();
        assert_eq!(node.element, "sheet");
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].text.as_deref(), Some("Vitals"));
        assert_eq!(
            node.children[0].children[0].text.as_deref(),
            Some("HP: 12")
        );
    }
}
