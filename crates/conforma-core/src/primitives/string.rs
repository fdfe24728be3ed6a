//! The string enforcer
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::sync::Arc;

use super::unwrap_value;
use crate::constraint::{CoerceFn, ValueConstraint};

/// Valid iff the value is a string. Coercion unwraps, passes strings
/// through, applies the default for null, and otherwise serializes the
/// value to its JSON text.
#[derive(Debug, Clone, Default)]
pub struct StringEnforcer {
    default: Option<Value>,
    value_key: Option<String>,
}

impl StringEnforcer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_value_key<K: Into<String>>(mut self, key: K) -> Self {
        self.value_key = Some(key.into());
        self
    }

    fn cast(&self, source: &Value) -> Value {
        let source = unwrap_value(&self.value_key, source);
        if source.is_string() {
            return source.clone();
        }
        if source.is_null() {
            if let Some(default) = &self.default {
                return default.clone();
            }
        }
        match serde_json::to_string(source) {
            Ok(text) => Value::String(text),
            Err(_) => Value::String(source.to_string()),
        }
    }
}

impl ValueConstraint for StringEnforcer {
    type Validation = bool;

    fn validate(&self, source: &Value) -> bool {
        source.is_string()
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
    fn test_validate_only_strings() {
        let enforcer = StringEnforcer::new();
        assert!(enforcer.validate(&json!("x")));
        assert!(enforcer.validate(&json!("")));
        assert!(!enforcer.validate(&json!(1)));
        assert!(!enforcer.validate(&json!(null)));
    }

    #[test]
    fn test_coerce_passes_strings_through() {
        let enforcer = StringEnforcer::new();
        assert_eq!(enforcer.coerce(&json!("abc")), Some(json!("abc")));
    }

    #[test]
    fn test_coerce_serializes_non_strings() {
        let enforcer = StringEnforcer::new();
        assert_eq!(enforcer.coerce(&json!(3)), Some(json!("3")));
        assert_eq!(enforcer.coerce(&json!(true)), Some(json!("true")));
        assert_eq!(enforcer.coerce(&json!([1, 2])), Some(json!("[1,2]")));
        assert_eq!(enforcer.coerce(&json!({"a": 1})), Some(json!("{\"a\":1}")));
        assert_eq!(enforcer.coerce(&json!(null)), Some(json!("null")));
    }

    #[test]
    fn test_coerce_null_prefers_default() {
        let enforcer = StringEnforcer::new().with_default(json!("fallback"));
        assert_eq!(enforcer.coerce(&json!(null)), Some(json!("fallback")));
    }

    #[test]
    fn test_coerce_unwraps_value_key() {
        let enforcer = StringEnforcer::new().with_value_key("value");
        assert_eq!(enforcer.coerce(&json!({"value": "x"})), Some(json!("x")));
    }
}
