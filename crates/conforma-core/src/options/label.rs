//! Human-readable labels for subschema alternatives
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

/// Labels a schema from the first present keyword in a configured
/// priority list, falling back to generic stringification. Callers
/// needing localization substitute their own keyword list (e.g. a
/// translated `title`) or post-process the labels.
#[derive(Debug, Clone)]
pub struct SchemaLabeler {
    keywords: Vec<String>,
}

impl Default for SchemaLabeler {
    fn default() -> Self {
        Self {
            keywords: vec![
                "title".to_string(),
                "const".to_string(),
                "type".to_string(),
            ],
        }
    }
}

impl SchemaLabeler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the keyword priority list
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn label(&self, schema: &Value) -> String {
        if let Value::Object(map) = schema {
            for keyword in &self.keywords {
                if let Some(value) = map.get(keyword) {
                    return stringify(value);
                }
            }
        }
        stringify(schema)
    }
}

/// Strings render bare; everything else renders as compact JSON text.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_uses_keyword_priority() {
        let labeler = SchemaLabeler::new();
        assert_eq!(labeler.label(&json!({"title": "Name", "const": "x"})), "Name");
        assert_eq!(labeler.label(&json!({"const": "a"})), "a");
        assert_eq!(labeler.label(&json!({"const": 1})), "1");
        assert_eq!(labeler.label(&json!({"type": "string"})), "string");
    }

    #[test]
    fn test_label_falls_back_to_stringification() {
        let labeler = SchemaLabeler::new();
        assert_eq!(labeler.label(&json!(true)), "true");
        assert_eq!(labeler.label(&json!({"enum": [1]})), "{\"enum\":[1]}");
    }

    #[test]
    fn test_custom_keyword_list() {
        let labeler = SchemaLabeler::new().with_keywords(["description"]);
        assert_eq!(
            labeler.label(&json!({"description": "d", "title": "t"})),
            "d"
        );
    }
}
