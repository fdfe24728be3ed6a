//! Pipeline combinators for coercion and validation steps
//!
//! Coercion steps compose sequentially: each step receives the previous
//! step's output. Validation steps compose with short-circuiting: the
//! first step whose report the interpreter deems invalid governs the
//! merged result. First-failure-wins is a contract here, not an accident;
//! rule registration order decides which complaint a caller sees.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::sync::Arc;

use crate::constraint::{CoerceFn, ValidateFn};
use crate::validity::Validity;

/// Merge coercion steps into one function that threads a value through
/// each step in array order.
pub fn merge_coerce_steps(steps: Vec<CoerceFn>) -> CoerceFn {
    Arc::new(move |source: &Value| {
        let mut current = source.clone();
        for step in &steps {
            current = step(&current);
        }
        current
    })
}

/// Merge validation steps into one function that returns the first report
/// the interpreter deems invalid, or the interpreter's canonical valid
/// report when every step passes.
pub fn merge_validate_steps<I>(steps: Vec<ValidateFn<I::Report>>, interpreter: I) -> ValidateFn<I::Report>
where
    I: Validity + Send + Sync + 'static,
    I::Report: 'static,
{
    Arc::new(move |source: &Value| {
        for step in &steps {
            let report = step(source);
            if !interpreter.is_valid(&report) {
                return report;
            }
        }
        interpreter.valid()
    })
}
