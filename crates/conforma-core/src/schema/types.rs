//! The `type` keyword: vocabulary, type table, and rule
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::constraint::{identity, SharedConstraint, TypeConstraint};
use crate::error::{Error, Result};
use crate::keyword::{KeywordEnforcerFork, KeywordRule, RuleContext, TypeKeywordRule};
use crate::primitives::{
    AnyEnforcer, ArrayEnforcer, BooleanEnforcer, EqualityEnforcer, NumberEnforcer, ObjectEnforcer,
    SteppedNumberEnforcer, StringEnforcer,
};

/// The supported type vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Any,
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl SchemaType {
    /// Every concrete type, `any` excluded; the canonical expansion of a
    /// `true` schema
    pub const PRIMITIVES: [SchemaType; 7] = [
        SchemaType::Array,
        SchemaType::Boolean,
        SchemaType::Integer,
        SchemaType::Null,
        SchemaType::Number,
        SchemaType::Object,
        SchemaType::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Any => "any",
            SchemaType::Array => "array",
            SchemaType::Boolean => "boolean",
            SchemaType::Integer => "integer",
            SchemaType::Null => "null",
            SchemaType::Number => "number",
            SchemaType::Object => "object",
            SchemaType::String => "string",
        }
    }

    /// The base predicate/cast enforcer for this type
    pub fn base_constraint(&self) -> TypeConstraint {
        match self {
            SchemaType::Any => Arc::new(AnyEnforcer::new()),
            SchemaType::Array => Arc::new(ArrayEnforcer::new()),
            SchemaType::Boolean => Arc::new(BooleanEnforcer::new()),
            SchemaType::Integer => Arc::new(SteppedNumberEnforcer::new(1.0)),
            SchemaType::Null => Arc::new(EqualityEnforcer::new(Value::Null)),
            SchemaType::Number => Arc::new(NumberEnforcer::new()),
            SchemaType::Object => Arc::new(ObjectEnforcer::new()),
            SchemaType::String => Arc::new(StringEnforcer::new()),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "any" => Ok(SchemaType::Any),
            "array" => Ok(SchemaType::Array),
            "boolean" => Ok(SchemaType::Boolean),
            "integer" => Ok(SchemaType::Integer),
            "null" => Ok(SchemaType::Null),
            "number" => Ok(SchemaType::Number),
            "object" => Ok(SchemaType::Object),
            "string" => Ok(SchemaType::String),
            other => Err(Error::UnknownType {
                name: other.to_string(),
            }),
        }
    }
}

/// A schema's `type` value, resolved to a tagged form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    Single(SchemaType),
    Union(Vec<SchemaType>),
}

impl TypeSpec {
    /// Resolve the raw keyword value; strings and arrays of strings only
    pub fn from_value(value: &Value) -> Result<TypeSpec> {
        match value {
            Value::String(name) => Ok(TypeSpec::Single(name.parse()?)),
            Value::Array(items) => {
                let types = items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .ok_or_else(|| {
                                Error::invalid_schema(format!(
                                    "'type' array entries must be strings, got {item}"
                                ))
                            })
                            .and_then(str::parse)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(TypeSpec::Union(types))
            }
            other => Err(Error::invalid_schema(format!(
                "'type' must be a string or an array of strings, got {other}"
            ))),
        }
    }
}

/// The fixed table of per-type rules backing the `type` keyword
#[derive(Clone)]
pub struct TypeRuleTable {
    rules: HashMap<SchemaType, TypeKeywordRule>,
}

impl Default for TypeRuleTable {
    fn default() -> Self {
        let mut rules = HashMap::new();
        for schema_type in [
            SchemaType::Any,
            SchemaType::Array,
            SchemaType::Boolean,
            SchemaType::Integer,
            SchemaType::Null,
            SchemaType::Number,
            SchemaType::Object,
            SchemaType::String,
        ] {
            rules.insert(
                schema_type,
                TypeKeywordRule::new(schema_type.as_str(), schema_type.base_constraint()),
            );
        }
        Self { rules }
    }
}

impl TypeRuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a keyword rule scoped to one type (evaluated only once a
    /// value of that type is confirmed)
    pub fn with_scoped_rule(mut self, schema_type: SchemaType, rule: Arc<dyn KeywordRule>) -> Self {
        if let Some(entry) = self.rules.remove(&schema_type) {
            self.rules
                .insert(schema_type, entry.with_scoped_rule(rule));
        }
        self
    }

    pub fn get(&self, schema_type: SchemaType) -> Option<&TypeKeywordRule> {
        self.rules.get(&schema_type)
    }
}

/// The rule for the `type` keyword: a single named type resolves against
/// the table; an array of types forks over the matching per-type rules
/// with an identity coercion fallback.
#[derive(Clone, Default)]
pub struct TypeRule {
    table: TypeRuleTable,
}

impl TypeRule {
    pub fn new(table: TypeRuleTable) -> Self {
        Self { table }
    }

    fn branch(
        &self,
        schema_type: SchemaType,
        schema: &Map<String, Value>,
        context: &RuleContext,
    ) -> Result<SharedConstraint> {
        let rule = self
            .table
            .get(schema_type)
            .ok_or_else(|| Error::UnknownType {
                name: schema_type.as_str().to_string(),
            })?;
        Ok(Arc::new(rule.build_enforcer(schema, context)?))
    }
}

impl KeywordRule for TypeRule {
    fn keyword(&self) -> &str {
        "type"
    }

    fn build(
        &self,
        schema: &Map<String, Value>,
        context: &RuleContext,
    ) -> Result<Option<SharedConstraint>> {
        let Some(value) = schema.get("type") else {
            return Ok(None);
        };
        match TypeSpec::from_value(value)? {
            TypeSpec::Single(schema_type) => {
                Ok(Some(self.branch(schema_type, schema, context)?))
            }
            TypeSpec::Union(types) => {
                let branches = types
                    .into_iter()
                    .map(|schema_type| self.branch(schema_type, schema, context))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Some(Arc::new(
                    KeywordEnforcerFork::new(branches).with_fallback(identity()),
                )))
            }
        }
    }
}
