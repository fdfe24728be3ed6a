//! The constraint primitive: a validate/coerce pair derived from a schema
//!
//! Every rule and enforcer in the engine implements [`ValueConstraint`].
//! Validation produces a report (a `bool` for the primitive type enforcers,
//! an [`ErrorLog`](crate::report::ErrorLog) for keyword-level constraints);
//! coercion, when a constraint carries one, transforms a non-conforming
//! value into one that conforms.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::sync::Arc;

use crate::report::ErrorLog;

/// A coercion step: transforms a value toward conformance.
///
/// Coercions must be idempotent-compatible: applying one to an already
/// conforming value must not invalidate it.
pub type CoerceFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// A validation step producing a report of type `R`.
pub type ValidateFn<R> = Arc<dyn Fn(&Value) -> R + Send + Sync>;

/// The identity coercion: returns its input unchanged.
pub fn identity() -> CoerceFn {
    Arc::new(|source| source.clone())
}

/// A validate/optional-coerce pair derived from a schema or keyword.
pub trait ValueConstraint {
    /// The structured outcome of validating a value.
    type Validation;

    /// Check `source` against this constraint.
    fn validate(&self, source: &Value) -> Self::Validation;

    /// The coercion attached to this constraint, or `None` when the
    /// constraint carries no coercion.
    fn coercion(&self) -> Option<CoerceFn>;

    /// Attempt to transform `source` into a conforming value.
    ///
    /// Returns `None` when this constraint carries no coercion.
    fn coerce(&self, source: &Value) -> Option<Value> {
        self.coercion().map(|step| step(source))
    }
}

/// A shared keyword-level constraint reporting an [`ErrorLog`].
pub type SharedConstraint = Arc<dyn ValueConstraint<Validation = ErrorLog> + Send + Sync>;

/// A shared primitive type constraint reporting a plain boolean.
pub type TypeConstraint = Arc<dyn ValueConstraint<Validation = bool> + Send + Sync>;
