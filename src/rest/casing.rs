//! Key-name conversion between call-site and wire conventions.
//!
//! Coinbase uses `lower_snake_case` keys. Parameters named in camelCase or
//! PascalCase are decamelized on the way out, and any camelCase keys in a
//! response are decamelized before decoding so they line up with Rust field
//! names.

use serde_json::{Map, Value};

/// Convert a camelCase or PascalCase key to snake_case.
///
/// Keys that are already snake_case pass through unchanged, as do keys made
/// only of uppercase letters, digits and underscores (currency codes such as
/// `"BTC"` used as map keys).
pub fn decamelize(key: &str) -> String {
    if is_constant_case(key) {
        return key.to_string();
    }

    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && prev != '_' {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Decamelize every object key in `value`, recursing into nested objects and arrays.
pub fn decamelize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(decamelize_map(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(decamelize_keys).collect()),
        other => other,
    }
}

pub(crate) fn decamelize_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (decamelize(&key), decamelize_keys(value)))
        .collect()
}

fn is_constant_case(key: &str) -> bool {
    key.chars().any(|c| c.is_uppercase())
        && key
            .chars()
            .all(|c| c.is_uppercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
