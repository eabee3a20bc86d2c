use crate::value::Value;

/// Deep merge `source` into `target`.
///
/// Merge rules:
/// - Objects: merged key by key, recursively; new keys are appended
/// - Arrays: the source array replaces the target array
/// - Everything else: the source value replaces the target value
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(key) {
                    Some(target_value) => deep_merge(target_value, source_value),
                    None => {
                        target_map.insert(key.clone(), source_value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn merged(target: serde_json::Value, source: serde_json::Value) -> Value {
        let mut target = Value::from(target);
        deep_merge(&mut target, &Value::from(source));
        target
    }

    #[test]
    fn test_objects_merge_recursively() {
        let result = merged(
            json!({ "extend": { "colors": { "border": "a" }, "keep": true } }),
            json!({ "extend": { "colors": { "input": "b" } } }),
        );
        assert_eq!(
            result,
            Value::from(json!({
                "extend": { "colors": { "border": "a", "input": "b" }, "keep": true }
            }))
        );
    }

    #[test]
    fn test_new_keys_are_appended_in_order() {
        let result = merged(json!({ "b": 1 }), json!({ "c": 2, "a": 3 }));
        let keys: Vec<_> = result.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_arrays_are_replaced() {
        let result = merged(
            json!({ "sans": ["Inter", "sans-serif"] }),
            json!({ "sans": ["Figtree"] }),
        );
        assert_eq!(result, Value::from(json!({ "sans": ["Figtree"] })));
    }

    #[test]
    fn test_scalars_are_overwritten() {
        let result = merged(
            json!({ "center": true, "padding": "2rem", "screens": { "2xl": "1400px" } }),
            json!({ "center": false, "screens": "none" }),
        );
        assert_eq!(
            result,
            Value::from(json!({ "center": false, "padding": "2rem", "screens": "none" }))
        );
    }

    #[test]
    fn test_expression_is_replaced_by_object() {
        let mut target = Value::Object(
            [("colors".to_string(), Value::Expr("defaultColors".to_string()))]
                .into_iter()
                .collect(),
        );
        deep_merge(&mut target, &Value::from(json!({ "colors": { "a": "b" } })));
        assert_eq!(target, Value::from(json!({ "colors": { "a": "b" } })));
    }
}
