//! The `const` keyword rule
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::constraint::SharedConstraint;
use crate::error::Result;
use crate::keyword::{KeywordRule, KeywordValueEnforcer, RuleContext};

/// Priority of a `const` mismatch; outranks `type`.
pub const CONST_PRIORITY: i32 = 150;

/// Valid iff deep-equal to the configured constant; coercion always
/// returns an independent copy of the constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstRule;

impl KeywordRule for ConstRule {
    fn keyword(&self) -> &str {
        "const"
    }

    fn build(
        &self,
        schema: &Map<String, Value>,
        _context: &RuleContext,
    ) -> Result<Option<SharedConstraint>> {
        let Some(constant) = schema.get("const") else {
            return Ok(None);
        };
        let expected = constant.clone();
        let fix = constant.clone();
        Ok(Some(Arc::new(
            KeywordValueEnforcer::new(
                "const",
                constant.clone(),
                Arc::new(move |source| *source == expected),
                CONST_PRIORITY,
            )
            .with_coerce(Arc::new(move |_| fix.clone())),
        )))
    }
}
