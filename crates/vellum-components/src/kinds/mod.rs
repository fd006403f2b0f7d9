//! Built-in component kinds.
//!
//! One module per kind. Shared helpers for computing embedded formulas and
//! coercing bag/form values live here.

pub mod checkbox;
pub mod dropdown;
pub mod label;
pub mod number_field;
pub mod panel;
pub mod roll_button;
pub mod table;
pub mod text_field;

use serde_json::Value;

use vellum_dice::source::RandomSource;
use vellum_formula::phrase::{ComputeOptions, compute};
use vellum_props::path::PropertyPath;
use vellum_props::resolve::resolve;

/// Helper for `skip_serializing_if` on `bool` fields.
pub(crate) fn is_false(b: &bool) -> bool {
    !b
}

/// Compute a possibly-formula string against the bag. Plain text passes
/// through unchanged.
pub(crate) fn compute_text(text: &str, bag: &Value, source: &mut dyn RandomSource) -> String {
    compute(text, bag, source, &ComputeOptions::default()).result
}

/// Look up a component's current value; the key may be a dotted path.
pub(crate) fn current_value<'a>(bag: &'a Value, key: &str) -> Option<&'a Value> {
    match PropertyPath::parse(key) {
        Ok(path) => resolve(bag, &path),
        Err(_) => None,
    }
}

/// Render a bag value for display in a field.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => format!("{}", f as i64),
                    _ => n.to_string(),
                }
            }
        }
        other => other.to_string(),
    }
}

/// Numeric view of a submitted value: numbers directly, strings by parsing.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Resolve a numeric constraint bound: a literal number, a numeric string,
/// or a formula string computed against the bag. Unresolvable bounds are
/// skipped rather than enforced.
pub(crate) fn numeric_bound(
    bound: Option<&Value>,
    bag: &Value,
    source: &mut dyn RandomSource,
) -> Option<f64> {
    let bound = bound?;
    match bound {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let text = compute_text(s, bag, source);
            text.trim().parse::<f64>().ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vellum_dice::source::FixedRolls;

    use super::*;

    #[test]
    fn display_value_formats() {
        assert_eq!(display_value(&json!("sword")), "sword");
        assert_eq!(display_value(&json!(7)), "7");
        assert_eq!(display_value(&json!(7.5)), "7.5");
        assert_eq!(display_value(&json!(true)), "true");
    }

    #[test]
    fn numeric_bound_literal_and_formula() {
        let bag = json!({ "level": 3 });
        let mut src = FixedRolls::new(vec![]);
        assert_eq!(numeric_bound(Some(&json!(5)), &bag, &mut src), Some(5.0));
        assert_eq!(numeric_bound(Some(&json!("10")), &bag, &mut src), Some(10.0));
        assert_eq!(
            numeric_bound(Some(&json!("${level * 10}$")), &bag, &mut src),
            Some(30.0)
        );
        assert_eq!(numeric_bound(Some(&json!("garbage")), &bag, &mut src), None);
        assert_eq!(numeric_bound(None, &bag, &mut src), None);
    }

    #[test]
    fn current_value_supports_paths() {
        let bag = json!({ "attributes": { "str": { "value": 14 } } });
        assert_eq!(
            current_value(&bag, "attributes.str.value"),
            Some(&json!(14))
        );
        assert_eq!(current_value(&bag, "missing"), None);
    }
}
