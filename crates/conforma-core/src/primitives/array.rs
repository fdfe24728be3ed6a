//! The array enforcer
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::sync::Arc;

use super::unwrap_value;
use crate::constraint::{CoerceFn, ValueConstraint};

/// Largest integer key honored when rebuilding an array from an object.
/// The rebuilt array is dense, so an unbounded key would size the
/// allocation; keys above this bound are dropped like non-numeric keys.
const MAX_REBUILD_INDEX: usize = 10_000;

/// Valid iff the value is an array.
///
/// Coercion, in order: unwrap; parse JSON text that encodes an array;
/// rebuild from an object's integer-named keys (gaps become null, keys
/// above [`MAX_REBUILD_INDEX`] are dropped); fall back to the configured
/// default for null input; otherwise wrap the value as a one-element
/// array.
#[derive(Debug, Clone, Default)]
pub struct ArrayEnforcer {
    default: Option<Value>,
    value_key: Option<String>,
}

impl ArrayEnforcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default value returned when coercing null input
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Unwrap a payload from this sub-property before coercing
    pub fn with_value_key<K: Into<String>>(mut self, key: K) -> Self {
        self.value_key = Some(key.into());
        self
    }

    fn cast(&self, source: &Value) -> Value {
        let source = unwrap_value(&self.value_key, source);
        if source.is_array() {
            return source.clone();
        }
        if let Value::String(text) = source {
            if let Ok(parsed) = serde_json::from_str::<Value>(text) {
                if parsed.is_array() {
                    return parsed;
                }
            }
        }
        if let Value::Object(map) = source {
            // Rebuild by integer index; non-numeric, negative,
            // fractional, and out-of-bound keys are dropped, gaps stay
            // null.
            let indexed: Vec<(usize, Value)> = map
                .iter()
                .filter_map(|(key, item)| {
                    key.parse::<usize>()
                        .ok()
                        .filter(|i| *i <= MAX_REBUILD_INDEX)
                        .map(|i| (i, item.clone()))
                })
                .collect();
            let len = indexed.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
            let mut items = vec![Value::Null; len];
            for (i, item) in indexed {
                items[i] = item;
            }
            return Value::Array(items);
        }
        if source.is_null() {
            if let Some(default) = &self.default {
                return default.clone();
            }
        }
        Value::Array(vec![source.clone()])
    }
}

impl ValueConstraint for ArrayEnforcer {
    type Validation = bool;

    fn validate(&self, source: &Value) -> bool {
        source.is_array()
    }

    fn coercion(&self) -> Option<CoerceFn> {
        let enforcer = self.clone();
        Some(Arc::new(move |source| enforcer.cast(source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_only_arrays() {
        let enforcer = ArrayEnforcer::new();
        assert!(enforcer.validate(&json!([])));
        assert!(enforcer.validate(&json!([1, "a"])));
        assert!(!enforcer.validate(&json!({"0": 1})));
        assert!(!enforcer.validate(&json!("[]")));
    }

    #[test]
    fn test_coerce_parses_json_text() {
        let enforcer = ArrayEnforcer::new();
        assert_eq!(enforcer.coerce(&json!("[1]")), Some(json!([1])));
        assert_eq!(enforcer.coerce(&json!("[1, \"a\"]")), Some(json!([1, "a"])));
        // Text that parses to a non-array is wrapped, not adopted.
        assert_eq!(enforcer.coerce(&json!("1")), Some(json!(["1"])));
    }

    #[test]
    fn test_coerce_rebuilds_from_indexed_object() {
        let enforcer = ArrayEnforcer::new();
        assert_eq!(
            enforcer.coerce(&json!({"0": "a", "2": "c"})),
            Some(json!(["a", null, "c"]))
        );
        // Non-numeric and negative keys are dropped.
        assert_eq!(
            enforcer.coerce(&json!({"0": "a", "x": "b", "-1": "c", "1.5": "d"})),
            Some(json!(["a"]))
        );
    }

    #[test]
    fn test_coerce_drops_indexes_beyond_rebuild_bound() {
        let enforcer = ArrayEnforcer::new();
        // Keys past the bound must not size the allocation.
        assert_eq!(
            enforcer.coerce(&json!({"0": "a", "4000000000": "b"})),
            Some(json!(["a"]))
        );
        assert_eq!(
            enforcer.coerce(&json!({"18446744073709551614": 1})),
            Some(json!([]))
        );
        // The bound itself is still honored.
        let coerced = enforcer
            .coerce(&json!({ (MAX_REBUILD_INDEX.to_string()): "end" }))
            .unwrap();
        let items = coerced.as_array().unwrap();
        assert_eq!(items.len(), MAX_REBUILD_INDEX + 1);
        assert_eq!(items[MAX_REBUILD_INDEX], json!("end"));
    }

    #[test]
    fn test_coerce_wraps_scalars() {
        let enforcer = ArrayEnforcer::new();
        assert_eq!(enforcer.coerce(&json!("z")), Some(json!(["z"])));
        assert_eq!(enforcer.coerce(&json!(5)), Some(json!([5])));
    }

    #[test]
    fn test_coerce_null_uses_default_copy() {
        let enforcer = ArrayEnforcer::new().with_default(json!([1, 2]));
        assert_eq!(enforcer.coerce(&json!(null)), Some(json!([1, 2])));

        // Without a default, null is wrapped like any other scalar.
        let bare = ArrayEnforcer::new();
        assert_eq!(bare.coerce(&json!(null)), Some(json!([null])));
    }

    #[test]
    fn test_coerce_unwraps_value_key_first() {
        let enforcer = ArrayEnforcer::new().with_value_key("value");
        assert_eq!(
            enforcer.coerce(&json!({"value": [1, 2]})),
            Some(json!([1, 2]))
        );
    }

    #[test]
    fn test_coerce_result_always_validates() {
        let enforcer = ArrayEnforcer::new();
        for value in [json!("z"), json!({"3": 1}), json!(null), json!(0.5)] {
            let coerced = enforcer.coerce(&value).unwrap();
            assert!(enforcer.validate(&coerced), "failed for {value}");
        }
    }
}
