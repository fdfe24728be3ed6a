//! Number and stepped-number enforcers
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::sync::Arc;

use super::{number_value, to_number, unwrap_value};
use crate::constraint::{CoerceFn, ValueConstraint};

/// Valid iff the value is a number. Coercion unwraps, numeric-casts, and
/// falls back to the configured default or zero when the cast fails.
#[derive(Debug, Clone, Default)]
pub struct NumberEnforcer {
    default: Option<Value>,
    value_key: Option<String>,
}

impl NumberEnforcer {
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

    pub(crate) fn cast(&self, source: &Value) -> Value {
        let source = unwrap_value(&self.value_key, source);
        match to_number(source) {
            Some(n) => number_value(n),
            None => self.default.clone().unwrap_or_else(|| Value::from(0)),
        }
    }
}

impl ValueConstraint for NumberEnforcer {
    type Validation = bool;

    fn validate(&self, source: &Value) -> bool {
        source.is_number()
    }

    fn coercion(&self) -> Option<CoerceFn> {
        let enforcer = self.clone();
        Some(Arc::new(move |source| enforcer.cast(source)))
    }
}

/// A number additionally constrained to multiples of `step` (the
/// `integer` type is step 1). Step 0 disables the divisibility check.
///
/// Coercion casts through the parent number enforcer, then rounds to the
/// nearest multiple of the step. Rounding is stable, so coercion is
/// idempotent.
#[derive(Debug, Clone)]
pub struct SteppedNumberEnforcer {
    inner: NumberEnforcer,
    step: f64,
}

impl Default for SteppedNumberEnforcer {
    fn default() -> Self {
        Self {
            inner: NumberEnforcer::new(),
            step: 1.0,
        }
    }
}

impl SteppedNumberEnforcer {
    pub fn new(step: f64) -> Self {
        Self {
            inner: NumberEnforcer::new(),
            step,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.inner = self.inner.with_default(default);
        self
    }

    pub fn with_value_key<K: Into<String>>(mut self, key: K) -> Self {
        self.inner = self.inner.with_value_key(key);
        self
    }

    fn cast(&self, source: &Value) -> Value {
        let base = self.inner.cast(source);
        if self.step == 0.0 {
            return base;
        }
        let f = base.as_f64().unwrap_or(0.0);
        number_value((f / self.step).round() * self.step)
    }
}

impl ValueConstraint for SteppedNumberEnforcer {
    type Validation = bool;

    fn validate(&self, source: &Value) -> bool {
        let Some(f) = source.as_f64() else {
            return false;
        };
        self.step == 0.0 || f % self.step == 0.0
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
    fn test_number_validate() {
        let enforcer = NumberEnforcer::new();
        assert!(enforcer.validate(&json!(1)));
        assert!(enforcer.validate(&json!(1.5)));
        assert!(!enforcer.validate(&json!("1")));
        assert!(!enforcer.validate(&json!(true)));
    }

    #[test]
    fn test_number_coerce_casts() {
        let enforcer = NumberEnforcer::new();
        assert_eq!(enforcer.coerce(&json!("12")), Some(json!(12)));
        assert_eq!(enforcer.coerce(&json!("1.5")), Some(json!(1.5)));
        assert_eq!(enforcer.coerce(&json!(true)), Some(json!(1)));
        assert_eq!(enforcer.coerce(&json!("abc")), Some(json!(0)));
    }

    #[test]
    fn test_number_coerce_failed_cast_uses_default() {
        let enforcer = NumberEnforcer::new().with_default(json!(42));
        assert_eq!(enforcer.coerce(&json!("abc")), Some(json!(42)));
        assert_eq!(enforcer.coerce(&json!(null)), Some(json!(42)));
        // A castable value ignores the default.
        assert_eq!(enforcer.coerce(&json!("7")), Some(json!(7)));
    }

    #[test]
    fn test_coerced_value_validates() {
        let enforcer = NumberEnforcer::new();
        let coerced = enforcer.coerce(&json!("abc")).unwrap();
        assert_eq!(coerced, json!(0));
        assert!(enforcer.validate(&coerced));
    }

    #[test]
    fn test_stepped_validate_requires_divisibility() {
        let integer = SteppedNumberEnforcer::new(1.0);
        assert!(integer.validate(&json!(3)));
        assert!(integer.validate(&json!(-2)));
        assert!(!integer.validate(&json!(2.5)));
        assert!(!integer.validate(&json!("3")));

        let halves = SteppedNumberEnforcer::new(0.5);
        assert!(halves.validate(&json!(1.5)));
        assert!(!halves.validate(&json!(1.3)));
    }

    #[test]
    fn test_stepped_zero_step_skips_check() {
        let enforcer = SteppedNumberEnforcer::new(0.0);
        assert!(enforcer.validate(&json!(2.5)));
        assert_eq!(enforcer.coerce(&json!("2.5")), Some(json!(2.5)));
    }

    #[test]
    fn test_stepped_coerce_rounds_to_nearest_multiple() {
        let integer = SteppedNumberEnforcer::new(1.0);
        assert_eq!(integer.coerce(&json!(2.4)), Some(json!(2)));
        assert_eq!(integer.coerce(&json!(2.6)), Some(json!(3)));
        assert_eq!(integer.coerce(&json!("7.8")), Some(json!(8)));

        let tens = SteppedNumberEnforcer::new(10.0);
        assert_eq!(tens.coerce(&json!(14)), Some(json!(10)));
        assert_eq!(tens.coerce(&json!(16)), Some(json!(20)));
    }

    #[test]
    fn test_stepped_coerce_is_idempotent() {
        let enforcer = SteppedNumberEnforcer::new(3.0);
        for value in [json!(2.5), json!(-7), json!("11"), json!(100.2)] {
            let once = enforcer.coerce(&value).unwrap();
            let twice = enforcer.coerce(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {value}");
            assert!(enforcer.validate(&once));
        }
    }
}
