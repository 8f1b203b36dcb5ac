//! Deep merge of JSON trees, used to fold paginated responses into one.
//!
//! Rules: objects merge key-wise, arrays concatenate in the order received,
//! scalars keep the first value seen.

use serde_json::Value;

pub fn deep_merge(first: Value, second: Value) -> Value {
    match (first, second) {
        (Value::Object(mut a), Value::Object(b)) => {
            for (key, incoming) in b {
                match a.remove(&key) {
                    Some(existing) => {
                        a.insert(key, deep_merge(existing, incoming));
                    }
                    None => {
                        a.insert(key, incoming);
                    }
                }
            }
            Value::Object(a)
        }
        (Value::Array(mut a), Value::Array(b)) => {
            a.extend(b);
            Value::Array(a)
        }
        // Scalars and mismatched shapes: first value wins.
        (a, _) => a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_objects_merge_key_wise() {
        let merged = deep_merge(json!({"a": 1, "b": {"x": 1}}), json!({"b": {"y": 2}, "c": 3}));
        assert_eq!(merged, json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
    }

    #[test]
    fn test_arrays_concatenate_in_order() {
        let merged = deep_merge(json!({"results": [1, 2]}), json!({"results": [3, 4]}));
        assert_eq!(merged, json!({"results": [1, 2, 3, 4]}));
    }

    #[test]
    fn test_scalars_keep_first_value() {
        let merged = deep_merge(json!({"id": "acc-1", "total": 2}), json!({"id": "acc-2", "total": 9}));
        assert_eq!(merged, json!({"id": "acc-1", "total": 2}));
    }

    #[test]
    fn test_nested_page_merge_keeps_record_order() {
        let page1 = json!({"paginatedActivities": {"results": [{"id": 1}, {"id": 2}], "offset": 0}});
        let page2 = json!({"paginatedActivities": {"results": [{"id": 3}], "offset": 100}});
        let merged = deep_merge(page1, page2);
        assert_eq!(
            merged,
            json!({"paginatedActivities": {"results": [{"id": 1}, {"id": 2}, {"id": 3}], "offset": 0}})
        );
    }
}
