//! The keyword rule engine
//!
//! Turns a schema object's keywords into named constraints, merges their
//! validations into one prioritized error log, and merges their coercions
//! into one pipeline. Rule order is fixed at construction: within a
//! merged schema the *first failing rule in registration order* governs
//! the reported validation, while union branches in a fork are ranked by
//! their least authoritative complaint. The two policies are distinct and
//! must not be confused.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

mod enforcer;
mod type_rule;

pub use enforcer::{CheckFn, KeywordEnforcerFork, KeywordValueEnforcer};
pub use type_rule::{TypeKeywordEnforcer, TypeKeywordRule, TYPE_PRIORITY};

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::constraint::{CoerceFn, SharedConstraint, ValidateFn, ValueConstraint};
use crate::error::{Error, Result};
use crate::pipeline::{merge_coerce_steps, merge_validate_steps};
use crate::report::ErrorLog;
use crate::validity::KeywordValidity;

/// Default bound on schema nesting
pub const MAX_SCHEMA_DEPTH: usize = 64;

/// Tracks nesting while enforcers are built from a schema, so cyclic or
/// deeply self-referential schemas fail with [`Error::SchemaTooDeep`]
/// instead of overflowing the stack.
#[derive(Debug, Clone)]
pub struct DepthGuard {
    depth: usize,
    max_depth: usize,
}

impl DepthGuard {
    pub fn root(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Descend one nesting level
    pub fn child(&self) -> Result<DepthGuard> {
        if self.depth + 1 > self.max_depth {
            return Err(Error::SchemaTooDeep {
                max_depth: self.max_depth,
            });
        }
        Ok(Self {
            depth: self.depth + 1,
            max_depth: self.max_depth,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for DepthGuard {
    fn default() -> Self {
        Self::root(MAX_SCHEMA_DEPTH)
    }
}

/// Shared context handed to each rule while a schema is processed:
/// constraints already built for sibling keywords, and the depth guard
/// for rules that build nested enforcers.
pub struct RuleContext {
    /// Keyword name to already-built constraint, in registration order
    pub constraints: HashMap<String, SharedConstraint>,
    /// Nesting guard for rules that recurse into subschemas
    pub guard: DepthGuard,
}

impl RuleContext {
    pub fn new(guard: DepthGuard) -> Self {
        Self {
            constraints: HashMap::new(),
            guard,
        }
    }
}

/// A rule that may contribute a constraint for one keyword of a schema
/// object. Returns `Ok(None)` when the keyword is absent or inapplicable.
pub trait KeywordRule: Send + Sync {
    /// The keyword this rule responds to
    fn keyword(&self) -> &str;

    /// Build the constraint for `schema`, consulting sibling constraints
    /// already present in `context`
    fn build(
        &self,
        schema: &Map<String, Value>,
        context: &RuleContext,
    ) -> Result<Option<SharedConstraint>>;
}

/// A composite constraint tagged with the schema it was derived from.
///
/// Stateless; a single enforcer may be shared and re-used across calls.
#[derive(Clone)]
pub struct SchemaEnforcer {
    schema: Value,
    validate: ValidateFn<ErrorLog>,
    coerce: Option<CoerceFn>,
    keywords: HashMap<String, SharedConstraint>,
}

impl SchemaEnforcer {
    pub(crate) fn from_parts(
        schema: Value,
        validate: ValidateFn<ErrorLog>,
        coerce: Option<CoerceFn>,
        keywords: HashMap<String, SharedConstraint>,
    ) -> Self {
        Self {
            schema,
            validate,
            coerce,
            keywords,
        }
    }

    /// The schema this enforcer was derived from
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// The constraint an individual keyword contributed, if any
    pub fn keyword_constraint(&self, keyword: &str) -> Option<&SharedConstraint> {
        self.keywords.get(keyword)
    }

    /// True when no keyword contributed a constraint
    pub fn is_vacuous(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl std::fmt::Debug for SchemaEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaEnforcer")
            .field("schema", &self.schema)
            .field("keywords", &self.keywords.keys().collect::<Vec<_>>())
            .field("coerce", &self.coerce.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl ValueConstraint for SchemaEnforcer {
    type Validation = ErrorLog;

    fn validate(&self, source: &Value) -> ErrorLog {
        (self.validate)(source)
    }

    fn coercion(&self) -> Option<CoerceFn> {
        self.coerce.clone()
    }
}

/// Builds a [`SchemaEnforcer`] from an ordered list of keyword rules.
///
/// Rules are asked in registration order whether they apply; produced
/// constraints merge first-failure-wins for validation and sequentially
/// for coercion.
#[derive(Default, Clone)]
pub struct SequentialKeywordEnforcerFactory {
    rules: Vec<Arc<dyn KeywordRule>>,
}

impl SequentialKeywordEnforcerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; registration order is evaluation order
    pub fn with_rule(mut self, rule: Arc<dyn KeywordRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn KeywordRule>>,
    {
        self.rules.extend(rules);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Build the composite enforcer for a schema object
    pub fn process(&self, schema: &Map<String, Value>, guard: &DepthGuard) -> Result<SchemaEnforcer> {
        let mut context = RuleContext::new(guard.clone());
        let mut applied: Vec<SharedConstraint> = Vec::new();

        for rule in &self.rules {
            if let Some(constraint) = rule.build(schema, &context)? {
                log::debug!("keyword rule '{}' applies", rule.keyword());
                context
                    .constraints
                    .insert(rule.keyword().to_string(), constraint.clone());
                applied.push(constraint);
            }
        }

        let validate_steps: Vec<ValidateFn<ErrorLog>> = applied
            .iter()
            .map(|constraint| {
                let constraint = constraint.clone();
                Arc::new(move |source: &Value| constraint.validate(source)) as ValidateFn<ErrorLog>
            })
            .collect();
        let validate = merge_validate_steps(validate_steps, KeywordValidity);

        let coerce_steps: Vec<CoerceFn> = applied
            .iter()
            .filter_map(|constraint| constraint.coercion())
            .collect();
        let coerce = if coerce_steps.is_empty() {
            None
        } else {
            Some(merge_coerce_steps(coerce_steps))
        };

        Ok(SchemaEnforcer::from_parts(
            Value::Object(schema.clone()),
            validate,
            coerce,
            context.constraints,
        ))
    }
}
