//! Schema decomposition into alternative subschemas
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::{json, Value};

use crate::schema::SchemaType;

/// Decomposes a schema into an ordered list of alternative subschemas.
///
/// Boolean schemas expand to canonical sets: `true` becomes one
/// single-type alternative per concrete type, `false` becomes a single
/// internally conflicting subschema no value can satisfy. An `enum`
/// expands into one `const` subschema per value; otherwise the first
/// present subschema-bearing keyword (`oneOf`, then `anyOf`, by default)
/// supplies its branches; failing that a multi-valued `type` array
/// expands per entry; otherwise the schema is its own sole alternative.
#[derive(Debug, Clone)]
pub struct JsonSchemaSplitter {
    subschema_keywords: Vec<String>,
}

impl Default for JsonSchemaSplitter {
    fn default() -> Self {
        Self {
            subschema_keywords: vec!["oneOf".to_string(), "anyOf".to_string()],
        }
    }
}

impl JsonSchemaSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override which keywords are searched for branch subschemas, and
    /// in which order
    pub fn with_subschema_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subschema_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn process(&self, schema: &Value) -> Vec<Value> {
        let alternatives = self.split(schema);
        log::debug!("split schema into {} alternative(s)", alternatives.len());
        alternatives
    }

    fn split(&self, schema: &Value) -> Vec<Value> {
        let map = match schema {
            Value::Bool(true) => {
                return SchemaType::PRIMITIVES
                    .iter()
                    .map(|t| json!({ "type": t.as_str() }))
                    .collect();
            }
            // `type` demands null while `const` demands false, so the
            // alternative can never validate.
            Value::Bool(false) => return vec![json!({"type": "null", "const": false})],
            Value::Object(map) => map,
            other => return vec![other.clone()],
        };

        if let Some(Value::Array(values)) = map.get("enum") {
            return values
                .iter()
                .map(|value| {
                    let mut sub = map.clone();
                    sub.remove("enum");
                    sub.insert("const".to_string(), value.clone());
                    Value::Object(sub)
                })
                .collect();
        }

        for keyword in &self.subschema_keywords {
            if let Some(Value::Array(branches)) = map.get(keyword) {
                return branches
                    .iter()
                    .filter(|branch| branch.is_boolean() || branch.is_object())
                    .cloned()
                    .collect();
            }
        }

        if let Some(Value::Array(types)) = map.get("type") {
            if types.len() > 1 {
                return types
                    .iter()
                    .map(|t| {
                        let mut sub = map.clone();
                        sub.insert("type".to_string(), t.clone());
                        Value::Object(sub)
                    })
                    .collect();
            }
        }

        vec![schema.clone()]
    }
}
