//! Single-keyword enforcement and branch forking for union types
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::sync::Arc;

use crate::constraint::{CoerceFn, SharedConstraint, ValueConstraint};
use crate::report::{ErrorLog, KeywordError};

/// A check function for a single keyword's value.
pub type CheckFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Wraps a single keyword's check into a constraint reporting an
/// [`ErrorLog`] with at most one entry.
#[derive(Clone)]
pub struct KeywordValueEnforcer {
    keyword: String,
    value: Value,
    check: CheckFn,
    coerce: Option<CoerceFn>,
    priority: i32,
}

impl KeywordValueEnforcer {
    pub fn new<K: Into<String>>(keyword: K, value: Value, check: CheckFn, priority: i32) -> Self {
        Self {
            keyword: keyword.into(),
            value,
            check,
            coerce: None,
            priority,
        }
    }

    /// Attach the keyword's fix-up coercion
    pub fn with_coerce(mut self, coerce: CoerceFn) -> Self {
        self.coerce = Some(coerce);
        self
    }
}

impl ValueConstraint for KeywordValueEnforcer {
    type Validation = ErrorLog;

    fn validate(&self, source: &Value) -> ErrorLog {
        if (self.check)(source) {
            return ErrorLog::valid();
        }
        let mut error = KeywordError::new(&self.keyword, self.value.clone(), source.clone())
            .with_priority(self.priority);
        if let Some(coerce) = &self.coerce {
            error = error.with_coerce(coerce.clone());
        }
        ErrorLog::from(error)
    }

    fn coercion(&self) -> Option<CoerceFn> {
        self.coerce.clone()
    }
}

/// A union of alternative branch constraints.
///
/// Validation tries branches in order and returns the first clean log.
/// When every branch fails, the failing log whose most authoritative
/// complaint carries the *lowest* priority is returned: the branch that
/// almost matched wins the right to complain.
#[derive(Clone)]
pub struct KeywordEnforcerFork {
    branches: Vec<SharedConstraint>,
    fallback: Option<CoerceFn>,
}

impl KeywordEnforcerFork {
    pub fn new(branches: Vec<SharedConstraint>) -> Self {
        Self {
            branches,
            fallback: None,
        }
    }

    /// Coercion applied when no branch error carries its own fix-up
    pub fn with_fallback(mut self, fallback: CoerceFn) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl ValueConstraint for KeywordEnforcerFork {
    type Validation = ErrorLog;

    fn validate(&self, source: &Value) -> ErrorLog {
        let mut least_bad: Option<(i32, ErrorLog)> = None;
        for branch in &self.branches {
            let report = branch.validate(source);
            if report.is_valid() {
                return report;
            }
            let worst = report.highest_priority().unwrap_or(0);
            match &least_bad {
                Some((best_worst, _)) if worst >= *best_worst => {}
                _ => least_bad = Some((worst, report)),
            }
        }
        least_bad
            .map(|(_, report)| report)
            .unwrap_or_else(ErrorLog::valid)
    }

    fn coercion(&self) -> Option<CoerceFn> {
        let fork = self.clone();
        Some(Arc::new(move |source: &Value| {
            // Re-validate to find the governing branch failure.
            let report = fork.validate(source);
            if let Some(step) = report.errors.first().and_then(|e| e.coerce.clone()) {
                return step(source);
            }
            if let Some(fallback) = &fork.fallback {
                return fallback(source);
            }
            source.clone()
        }))
    }
}
