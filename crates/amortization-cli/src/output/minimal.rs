use serde_json::Value;

use super::plain;

/// Print just the key answer value from the output.
///
/// The periodic payment is the answer for every loan type; anything else
/// falls back to the first scalar field of the result.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["periodic_payment", "quoted_payment"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return plain(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().find(|(_, v)| !v.is_array() && !v.is_object()) {
            return format!("{}: {}", key, plain(val));
        }
    }

    plain(result_obj)
}
