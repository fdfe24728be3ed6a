//! The strict-equality enforcer
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::sync::Arc;

use crate::constraint::{CoerceFn, ValueConstraint};

/// Valid iff the value is deep-equal to the configured expected value.
/// Coercion returns an independent copy of the expected value regardless
/// of input.
#[derive(Debug, Clone)]
pub struct EqualityEnforcer {
    expected: Value,
}

impl EqualityEnforcer {
    pub fn new(expected: Value) -> Self {
        Self { expected }
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }
}

impl ValueConstraint for EqualityEnforcer {
    type Validation = bool;

    fn validate(&self, source: &Value) -> bool {
        *source == self.expected
    }

    fn coercion(&self) -> Option<CoerceFn> {
        let expected = self.expected.clone();
        Some(Arc::new(move |_| expected.clone()))
    }
}
