//! Resolving parsed paths against a property bag.
//!
//! Resolution is lenient: any missing key, bad index, or type mismatch makes
//! the whole lookup return `None`, which callers turn into their configured
//! default. Dynamic segments are resolved against the same bag first and the
//! resulting scalar is used as the key.

use serde_json::Value;
use tracing::debug;

use crate::path::{PathSegment, PropertyPath};

/// Resolve a parsed path against a bag.
///
/// Returns `None` when any segment is missing or unusable. Dynamic segments
/// that resolve to a number index into arrays; any other scalar is used as an
/// object key.
pub fn resolve<'a>(bag: &'a Value, path: &PropertyPath) -> Option<&'a Value> {
    let mut current = bag;
    for seg in &path.segments {
        current = match seg {
            PathSegment::Key(key) => current.get(key.as_str())?,
            PathSegment::Index(idx) => current.get(*idx)?,
            PathSegment::Dynamic(sub) => {
                let key_value = resolve(bag, sub)?;
                step_dynamic(current, key_value)?
            }
        };
    }
    Some(current)
}

/// Resolve a path string, degrading to `default` on parse failure or a miss.
pub fn resolve_or<'a>(bag: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    match PropertyPath::parse(path) {
        Ok(parsed) => resolve(bag, &parsed).unwrap_or_else(|| {
            debug!(path, "property not found, using default");
            default
        }),
        Err(err) => {
            debug!(path, %err, "unparseable property path, using default");
            default
        }
    }
}

/// Step into `current` using a resolved dynamic key value.
fn step_dynamic<'a>(current: &'a Value, key: &Value) -> Option<&'a Value> {
    match key {
        Value::String(s) => current.get(s.as_str()),
        Value::Number(n) => {
            if current.is_array() {
                current.get(n.as_u64()? as usize)
            } else {
                current.get(scalar_key(key)?.as_str())
            }
        }
        _ => None,
    }
}

/// Render a scalar value as an object key string.
///
/// Integral floats render without a fractional part so `7.0` keys as `"7"`.
pub fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.fract() == 0.0 {
                        format!("{}", f as i64)
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
