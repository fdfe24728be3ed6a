//! The boolean enforcer
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::sync::Arc;

use super::{truthy, unwrap_value};
use crate::constraint::{CoerceFn, ValueConstraint};

/// Valid iff the value is a boolean. Coercion applies standard
/// truthiness after unwrapping, with the configured default for null.
#[derive(Debug, Clone, Default)]
pub struct BooleanEnforcer {
    default: Option<Value>,
    value_key: Option<String>,
}

impl BooleanEnforcer {
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
        if source.is_null() {
            if let Some(default) = &self.default {
                return default.clone();
            }
        }
        Value::Bool(truthy(source))
    }
}

impl ValueConstraint for BooleanEnforcer {
    type Validation = bool;

    fn validate(&self, source: &Value) -> bool {
        source.is_boolean()
    }

    fn coercion(&self) -> Option<CoerceFn> {
        let enforcer = self.clone();
        Some(Arc::new(move |source| enforcer.cast(source)))
    }
}
