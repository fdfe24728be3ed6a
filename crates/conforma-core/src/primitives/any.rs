//! The any-value enforcer: accepts everything, coerces nothing
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

use crate::constraint::{identity, CoerceFn, ValueConstraint};

/// Accepts any value; coercion is the identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyEnforcer;

impl AnyEnforcer {
    pub fn new() -> Self {
        Self
    }
}

impl ValueConstraint for AnyEnforcer {
    type Validation = bool;

    fn validate(&self, _source: &Value) -> bool {
        true
    }

    fn coercion(&self) -> Option<CoerceFn> {
        Some(identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_any_accepts_everything() {
        let enforcer = AnyEnforcer::new();
        for value in [json!(null), json!(0), json!("x"), json!([1]), json!({})] {
            assert!(enforcer.validate(&value));
            assert_eq!(enforcer.coerce(&value), Some(value));
        }
    }
}
