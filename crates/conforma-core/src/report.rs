//! Structured validation outcomes: keyword errors and the error log
//!
//! A failed validation is never an exception; it is an [`ErrorLog`] whose
//! entries identify which keyword rejected the value, what that keyword
//! expected, and how authoritative the complaint is. An empty log means
//! the value conforms.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::constraint::CoerceFn;

/// A single keyword-level validation failure
#[derive(Clone, Serialize)]
pub struct KeywordError {
    /// The keyword that rejected the value, or `None` for a schema-level
    /// rejection (a `false` schema)
    pub keyword: Option<String>,
    /// The keyword's own schema value (what was expected)
    pub value: Value,
    /// The offending value
    pub target: Value,
    /// Relative authority of this failure; higher outranks lower
    pub priority: i32,
    /// Localized fix-up for this specific failure, when one exists
    #[serde(skip)]
    pub coerce: Option<CoerceFn>,
}

impl KeywordError {
    /// Create a keyword error with default priority 0
    pub fn new<K: Into<String>>(keyword: K, value: Value, target: Value) -> Self {
        Self {
            keyword: Some(keyword.into()),
            value,
            target,
            priority: 0,
            coerce: None,
        }
    }

    /// Create a schema-level rejection carrying no keyword
    pub fn schema_level(value: Value, target: Value) -> Self {
        Self {
            keyword: None,
            value,
            target,
            priority: 0,
            coerce: None,
        }
    }

    /// Set the priority of this error
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Attach a fix-up coercion for this specific failure
    pub fn with_coerce(mut self, coerce: CoerceFn) -> Self {
        self.coerce = Some(coerce);
        self
    }
}

impl fmt::Debug for KeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordError")
            .field("keyword", &self.keyword)
            .field("value", &self.value)
            .field("target", &self.target)
            .field("priority", &self.priority)
            .field("coerce", &self.coerce.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl fmt::Display for KeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.keyword {
            Some(keyword) => write!(
                f,
                "keyword '{}' rejected {}: expected {} (priority {})",
                keyword, self.target, self.value, self.priority
            ),
            None => write!(f, "schema rejected {}", self.target),
        }
    }
}

/// The structured outcome of a validation: an empty list means valid
#[derive(Clone, Debug, Default, Serialize)]
pub struct ErrorLog {
    /// Keyword-level failures, in the order they were reported
    pub errors: Vec<KeywordError>,
}

impl ErrorLog {
    /// The canonical valid outcome: an empty log
    pub fn valid() -> Self {
        Self { errors: Vec::new() }
    }

    /// True when no failures were reported
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of reported failures
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when the log holds no entries
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add a failure to the log
    pub fn push(&mut self, error: KeywordError) {
        self.errors.push(error);
    }

    /// The priority of the most authoritative failure, if any
    pub fn highest_priority(&self) -> Option<i32> {
        self.errors.iter().map(|e| e.priority).max()
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "valid");
        }
        write!(f, "{} validation failure(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl From<KeywordError> for ErrorLog {
    fn from(error: KeywordError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<KeywordError>> for ErrorLog {
    fn from(errors: Vec<KeywordError>) -> Self {
        Self { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_empty_log_is_valid() {
        let log = ErrorLog::valid();
        assert!(log.is_valid());
        assert_eq!(log.len(), 0);
        assert_eq!(log.highest_priority(), None);
        assert_eq!(log.to_string(), "valid");
    }

    #[test]
    fn test_highest_priority_picks_max() {
        let log = ErrorLog::from(vec![
            KeywordError::new("const", json!(1), json!(2)).with_priority(150),
            KeywordError::new("type", json!("number"), json!(2)).with_priority(100),
        ]);
        assert!(!log.is_valid());
        assert_eq!(log.highest_priority(), Some(150));
    }

    #[test]
    fn test_display_renders_keyword_and_target() {
        let log = ErrorLog::from(KeywordError::new("type", json!("string"), json!(3)));
        let rendered = log.to_string();
        assert!(rendered.contains("keyword 'type'"));
        assert!(rendered.contains("rejected 3"));
    }

    #[test]
    fn test_schema_level_error_has_no_keyword() {
        let err = KeywordError::schema_level(json!(false), json!("anything"));
        assert_eq!(err.keyword, None);
        assert_eq!(err.priority, 0);
        assert!(err.to_string().starts_with("schema rejected"));
    }

    #[test]
    fn test_serialize_skips_coercion() {
        let err = KeywordError::new("const", json!(1), json!(2))
            .with_coerce(Arc::new(|_| json!(1)));
        let serialized = serde_json::to_value(&err).unwrap();
        assert_eq!(serialized["keyword"], json!("const"));
        assert!(serialized.get("coerce").is_none());
    }
}
