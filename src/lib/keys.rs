use serde_json::Value;

/// Collects the leaf field names of `value`, depth first.
///
/// Nested objects are expanded in place, in their own key order. Arrays expand
/// by index. Anything that is not an object or array (including `null`) is a
/// leaf. A scalar root has no keys.
pub fn extract_keys(value: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    collect(value, &mut keys);
    keys
}

fn collect(value: &Value, keys: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                push_or_descend(key.clone(), child, keys);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                push_or_descend(index.to_string(), child, keys);
            }
        }
        _ => {}
    }
}

fn push_or_descend(key: String, child: &Value, keys: &mut Vec<String>) {
    match child {
        Value::Object(_) | Value::Array(_) => collect(child, keys),
        _ => keys.push(key),
    }
}
