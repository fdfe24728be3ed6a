//! JSON-Schema bindings: the top-level enforcer factory
//!
//! A schema document is either a boolean literal (`true` accepts
//! everything, `false` rejects everything) or an object whose keywords
//! are resolved by the keyword rule engine. Unsupported keywords are
//! silently ignored; callers extend the rule list to add more.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

mod const_rule;
mod types;

pub use const_rule::{ConstRule, CONST_PRIORITY};
pub use types::{SchemaType, TypeRule, TypeRuleTable, TypeSpec};

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::constraint::identity;
use crate::error::{Error, Result};
use crate::keyword::{
    DepthGuard, KeywordRule, SchemaEnforcer, SequentialKeywordEnforcerFactory, MAX_SCHEMA_DEPTH,
};
use crate::report::{ErrorLog, KeywordError};

/// The always-valid enforcer a `true` schema binds to
fn allow_all(schema: Value) -> SchemaEnforcer {
    SchemaEnforcer::from_parts(
        schema,
        Arc::new(|_: &Value| ErrorLog::valid()),
        Some(identity()),
        HashMap::new(),
    )
}

/// The always-invalid enforcer a `false` schema binds to; the single
/// reported error carries no keyword
fn deny_all(schema: Value) -> SchemaEnforcer {
    SchemaEnforcer::from_parts(
        schema,
        Arc::new(|source: &Value| {
            ErrorLog::from(KeywordError::schema_level(
                Value::Bool(false),
                source.clone(),
            ))
        }),
        None,
        HashMap::new(),
    )
}

/// Builds [`SchemaEnforcer`]s from schema documents.
///
/// The default rule list is `type` then `const`; callers may supply their
/// own list to extend or reorder the vocabulary. Nested processing is
/// bounded by a recursion depth limit.
#[derive(Clone)]
pub struct JsonSchemaEnforcerFactory {
    rules: SequentialKeywordEnforcerFactory,
    max_depth: usize,
}

impl Default for JsonSchemaEnforcerFactory {
    fn default() -> Self {
        Self::from_rules(vec![
            Arc::new(TypeRule::default()) as Arc<dyn KeywordRule>,
            Arc::new(ConstRule),
        ])
    }
}

impl JsonSchemaEnforcerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct with a custom keyword-rule list, replacing the defaults
    pub fn from_rules(rules: Vec<Arc<dyn KeywordRule>>) -> Self {
        Self {
            rules: SequentialKeywordEnforcerFactory::new().with_rules(rules),
            max_depth: MAX_SCHEMA_DEPTH,
        }
    }

    /// Append a rule after the current list
    pub fn with_rule(mut self, rule: Arc<dyn KeywordRule>) -> Self {
        self.rules = self.rules.with_rule(rule);
        self
    }

    /// Override the recursion depth bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build the enforcer for a schema document
    pub fn process(&self, schema: &Value) -> Result<SchemaEnforcer> {
        self.process_at(schema, &DepthGuard::root(self.max_depth))
    }

    /// Build at an explicit nesting level; rules that recurse into
    /// subschemas call this with a descended guard
    pub fn process_at(&self, schema: &Value, guard: &DepthGuard) -> Result<SchemaEnforcer> {
        match schema {
            Value::Bool(true) => Ok(allow_all(schema.clone())),
            Value::Bool(false) => Ok(deny_all(schema.clone())),
            Value::Object(map) => self.rules.process(map, guard),
            other => Err(Error::invalid_schema(format!(
                "expected a boolean or object schema, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::ValueConstraint;
    use serde_json::json;

    #[test]
    fn test_true_schema_accepts_everything() {
        let enforcer = JsonSchemaEnforcerFactory::new().process(&json!(true)).unwrap();
        for value in [json!(null), json!(0), json!("x"), json!([1]), json!({})] {
            assert!(enforcer.validate(&value).is_valid());
            assert_eq!(enforcer.coerce(&value), Some(value));
        }
    }

    #[test]
    fn test_false_schema_rejects_everything() {
        let enforcer = JsonSchemaEnforcerFactory::new().process(&json!(false)).unwrap();
        for value in [json!(null), json!(0), json!("x"), json!({})] {
            let report = enforcer.validate(&value);
            assert_eq!(report.len(), 1);
            assert_eq!(report.errors[0].keyword, None);
            assert_eq!(report.errors[0].target, value);
        }
        assert!(enforcer.coercion().is_none());
    }

    #[test]
    fn test_object_schema_dispatches_to_keyword_engine() {
        let enforcer = JsonSchemaEnforcerFactory::new()
            .process(&json!({"type": "string"}))
            .unwrap();
        assert!(enforcer.validate(&json!("x")).is_valid());
        assert!(!enforcer.validate(&json!(1)).is_valid());
        assert_eq!(enforcer.coerce(&json!(1)), Some(json!("1")));
    }

    #[test]
    fn test_const_outranks_type_in_priority() {
        let enforcer = JsonSchemaEnforcerFactory::new()
            .process(&json!({"type": "number", "const": 5}))
            .unwrap();
        // Registration order reports the type failure first for a string...
        let report = enforcer.validate(&json!("x"));
        assert_eq!(report.errors[0].keyword.as_deref(), Some("type"));
        // ...but a number failing only `const` reports the 150 complaint.
        let report = enforcer.validate(&json!(6));
        assert_eq!(report.errors[0].keyword.as_deref(), Some("const"));
        assert_eq!(report.errors[0].priority, CONST_PRIORITY);
    }

    #[test]
    fn test_non_schema_documents_are_rejected() {
        let factory = JsonSchemaEnforcerFactory::new();
        assert!(matches!(
            factory.process(&json!("nope")),
            Err(Error::InvalidSchema { .. })
        ));
        assert!(matches!(
            factory.process(&json!([1, 2])),
            Err(Error::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_unknown_type_fails_at_build_time() {
        let factory = JsonSchemaEnforcerFactory::new();
        assert_eq!(
            factory.process(&json!({"type": "tuple"})).unwrap_err(),
            Error::UnknownType {
                name: "tuple".to_string()
            }
        );
    }

    #[test]
    fn test_unsupported_keywords_are_ignored() {
        let enforcer = JsonSchemaEnforcerFactory::new()
            .process(&json!({"type": "number", "maximum": 3}))
            .unwrap();
        // `maximum` is not in the default vocabulary.
        assert!(enforcer.validate(&json!(100)).is_valid());
    }
}
