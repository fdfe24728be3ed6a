//! Primitive type enforcers: per-JSON-type validate/coerce rules
//!
//! Each enforcer validates one JSON value category and carries a total,
//! best-effort coercion toward it. Coercions never fail: malformed input
//! degrades to a fallback value (callers that need strictness inspect
//! `validate` before trusting `coerce`). Enforcers optionally carry a
//! default value and an unwrap key for extracting a payload from a named
//! sub-property before coercion.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

mod any;
mod array;
mod boolean;
mod equality;
mod number;
mod object;
mod string;

pub use any::AnyEnforcer;
pub use array::ArrayEnforcer;
pub use boolean::BooleanEnforcer;
pub use equality::EqualityEnforcer;
pub use number::{NumberEnforcer, SteppedNumberEnforcer};
pub use object::ObjectEnforcer;
pub use string::StringEnforcer;

use serde_json::Value;

/// Extract the payload from a named sub-property when configured and
/// present; otherwise the value itself.
pub(crate) fn unwrap_value<'a>(value_key: &Option<String>, source: &'a Value) -> &'a Value {
    if let Some(key) = value_key {
        if let Some(inner) = source.as_object().and_then(|map| map.get(key)) {
            return inner;
        }
    }
    source
}

/// Numeric cast. `None` means not-a-number; the caller substitutes its
/// default or zero.
pub(crate) fn to_number(source: &Value) -> Option<f64> {
    match source {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
            }
        }
        _ => None,
    }
}

/// Build a JSON number from an f64, preserving integer representation
/// where the value is whole.
pub(crate) fn number_value(f: f64) -> Value {
    if !f.is_finite() {
        return Value::from(0);
    }
    if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 {
        return Value::from(f as i64);
    }
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

/// Standard truthiness: null, false, zero, NaN, and the empty string are
/// falsy; everything else is truthy.
pub(crate) fn truthy(source: &Value) -> bool {
    match source {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
