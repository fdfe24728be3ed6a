//! The object enforcer
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::constraint::{CoerceFn, ValueConstraint};

/// Valid iff the value is an object.
///
/// Coercion, in order: parse JSON text that encodes an object; rebuild
/// from an array keyed by stringified index (null slots dropped); pass
/// objects through; otherwise fall back to a copy of the default, then to
/// wrapping the raw value under the configured value key, then to an
/// empty object.
#[derive(Debug, Clone, Default)]
pub struct ObjectEnforcer {
    default: Option<Value>,
    value_key: Option<String>,
}

impl ObjectEnforcer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Key under which a raw scalar is wrapped when no default applies
    pub fn with_value_key<K: Into<String>>(mut self, key: K) -> Self {
        self.value_key = Some(key.into());
        self
    }

    fn cast(&self, source: &Value) -> Value {
        if let Value::String(text) = source {
            if let Ok(parsed) = serde_json::from_str::<Value>(text) {
                if parsed.is_object() {
                    return parsed;
                }
            }
        }
        if let Value::Array(items) = source {
            let mut map = Map::new();
            for (i, item) in items.iter().enumerate() {
                if !item.is_null() {
                    map.insert(i.to_string(), item.clone());
                }
            }
            return Value::Object(map);
        }
        if source.is_object() {
            return source.clone();
        }
        if let Some(default) = &self.default {
            return default.clone();
        }
        if let Some(key) = &self.value_key {
            let mut map = Map::new();
            map.insert(key.clone(), source.clone());
            return Value::Object(map);
        }
        Value::Object(Map::new())
    }
}

impl ValueConstraint for ObjectEnforcer {
    type Validation = bool;

    fn validate(&self, source: &Value) -> bool {
        source.is_object()
    }

    fn coercion(&self) -> Option<CoerceFn> {
        let enforcer = self.clone();
        Some(Arc::new(move |source| enforcer.cast(source)))
    }
}
