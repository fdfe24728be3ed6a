//! Type-scoped keyword enforcement
//!
//! A [`TypeKeywordEnforcer`] checks a base type predicate first, at the
//! highest default priority, and only then runs a nested keyword-rule
//! engine scoped to that type — numeric constraints are never evaluated
//! against a value that is not numeric.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};
use std::sync::Arc;

use super::{RuleContext, SchemaEnforcer, SequentialKeywordEnforcerFactory};
use crate::constraint::{CoerceFn, TypeConstraint, ValueConstraint};
use crate::error::Result;
use crate::report::{ErrorLog, KeywordError};

/// Priority of a base type mismatch; the highest in the default rule set,
/// so type failures dominate sibling keyword failures.
pub const TYPE_PRIORITY: i32 = 100;

/// Enforces one type branch of a `type` keyword: the base predicate plus
/// an optional nested engine of type-scoped keywords.
#[derive(Clone)]
pub struct TypeKeywordEnforcer {
    type_name: String,
    base: TypeConstraint,
    nested: Option<SchemaEnforcer>,
    priority: i32,
}

impl TypeKeywordEnforcer {
    pub fn new(type_name: impl Into<String>, base: TypeConstraint, nested: Option<SchemaEnforcer>) -> Self {
        Self {
            type_name: type_name.into(),
            base,
            nested,
            priority: TYPE_PRIORITY,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl ValueConstraint for TypeKeywordEnforcer {
    type Validation = ErrorLog;

    fn validate(&self, source: &Value) -> ErrorLog {
        if !self.base.validate(source) {
            let mut error = KeywordError::new(
                "type",
                Value::String(self.type_name.clone()),
                source.clone(),
            )
            .with_priority(self.priority);
            if let Some(coerce) = self.coercion() {
                error = error.with_coerce(coerce);
            }
            return ErrorLog::from(error);
        }
        match &self.nested {
            Some(nested) => nested.validate(source),
            None => ErrorLog::valid(),
        }
    }

    fn coercion(&self) -> Option<CoerceFn> {
        // Cast to the base type first, then apply the scoped engine's
        // coercion if one exists.
        let base = self.base.coercion();
        let nested = self.nested.as_ref().and_then(|n| n.coercion());
        if base.is_none() && nested.is_none() {
            return None;
        }
        Some(Arc::new(move |source: &Value| {
            let cast = match &base {
                Some(step) => step(source),
                None => source.clone(),
            };
            match &nested {
                Some(step) => step(&cast),
                None => cast,
            }
        }))
    }
}

/// Builds the [`TypeKeywordEnforcer`] for one named type: a base
/// predicate plus a registry of keywords scoped to that type.
#[derive(Clone)]
pub struct TypeKeywordRule {
    name: String,
    base: TypeConstraint,
    scoped: SequentialKeywordEnforcerFactory,
}

impl TypeKeywordRule {
    pub fn new(name: impl Into<String>, base: TypeConstraint) -> Self {
        Self {
            name: name.into(),
            base,
            scoped: SequentialKeywordEnforcerFactory::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a keyword rule evaluated only for values of this type
    pub fn with_scoped_rule(mut self, rule: Arc<dyn super::KeywordRule>) -> Self {
        self.scoped = self.scoped.with_rule(rule);
        self
    }

    /// Build the enforcer for `schema`, descending one nesting level for
    /// the scoped engine
    pub fn build_enforcer(
        &self,
        schema: &Map<String, Value>,
        context: &RuleContext,
    ) -> Result<TypeKeywordEnforcer> {
        let nested = if self.scoped.is_empty() {
            None
        } else {
            let guard = context.guard.child()?;
            let enforcer = self.scoped.process(schema, &guard)?;
            if enforcer.is_vacuous() {
                None
            } else {
                Some(enforcer)
            }
        };
        Ok(TypeKeywordEnforcer::new(
            self.name.clone(),
            self.base.clone(),
            nested,
        ))
    }
}
