//! Threshold-table lookups.
//!
//! A table is an ordered list of `(numeric threshold, value)` rows. Looking
//! up a key returns the value of the greatest threshold at or below the key;
//! a key below every threshold is a miss and the caller's default applies.

use serde_json::Value;

/// Look up `key` in threshold rows, returning the value of the greatest
/// threshold `<= key`.
///
/// Rows do not need to be sorted; the best match is found by scanning.
pub fn lookup<'a>(rows: &'a [(f64, Value)], key: f64) -> Option<&'a Value> {
    let mut best: Option<&(f64, Value)> = None;
    for row in rows {
        if row.0 <= key {
            match best {
                Some(b) if b.0 >= row.0 => {}
                _ => best = Some(row),
            }
        }
    }
    best.map(|(_, v)| v)
}

/// Extract threshold rows from a bag value.
///
/// Accepts two shapes commonly produced by sheet designers:
/// - an array of `[threshold, value]` pairs
/// - an array of `{ "threshold": n, "value": v }` objects
pub fn rows_from_value(value: &Value) -> Option<Vec<(f64, Value)>> {
    let items = value.as_array()?;
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Array(pair) if pair.len() == 2 => {
                rows.push((pair[0].as_f64()?, pair[1].clone()));
            }
            Value::Object(map) => {
                let threshold = map.get("threshold")?.as_f64()?;
                let v = map.get("value")?.clone();
                rows.push((threshold, v));
            }
            _ => return None,
        }
    }
    Some(rows)
}
