//! Validity interpretation: what counts as valid, and how valid
//!
//! A [`Validity`] interpreter abstracts over validation report shapes so
//! the pipeline combinators can short-circuit on any of them, and rates a
//! report numerically so callers can rank alternatives (higher is better,
//! 1.0 is fully valid).
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::report::ErrorLog;

/// Interprets validation reports of type `Report`
pub trait Validity {
    /// The report shape this interpreter understands
    type Report;

    /// Whether the report describes a valid value
    fn is_valid(&self, report: &Self::Report) -> bool;

    /// The canonical valid report
    fn valid(&self) -> Self::Report;

    /// Numeric rating of the report; higher is better, 1.0 is valid
    fn rate(&self, report: &Self::Report) -> f64;
}

/// Interprets plain boolean reports
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolValidity;

impl Validity for BoolValidity {
    type Report = bool;

    fn is_valid(&self, report: &bool) -> bool {
        *report
    }

    fn valid(&self) -> bool {
        true
    }

    fn rate(&self, report: &bool) -> f64 {
        if *report {
            1.0
        } else {
            0.0
        }
    }
}

/// Interprets [`ErrorLog`] reports by error count: more errors, lower rating
#[derive(Debug, Clone, Copy, Default)]
pub struct LogValidity;

impl Validity for LogValidity {
    type Report = ErrorLog;

    fn is_valid(&self, report: &ErrorLog) -> bool {
        report.is_valid()
    }

    fn valid(&self) -> ErrorLog {
        ErrorLog::valid()
    }

    fn rate(&self, report: &ErrorLog) -> f64 {
        1.0 - report.len() as f64
    }
}

/// Interprets [`ErrorLog`] reports by keyword priority.
///
/// A failing log rates as the *negative* of its most authoritative error's
/// priority, so among failing alternatives the one whose worst complaint is
/// least authoritative rates best. A clean log rates 1.0. This asymmetry is
/// what drives union-branch selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordValidity;

impl Validity for KeywordValidity {
    type Report = ErrorLog;

    fn is_valid(&self, report: &ErrorLog) -> bool {
        report.is_valid()
    }

    fn valid(&self) -> ErrorLog {
        ErrorLog::valid()
    }

    fn rate(&self, report: &ErrorLog) -> f64 {
        match report.highest_priority() {
            Some(priority) => -(priority as f64),
            None => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::KeywordError;
    use serde_json::json;

    #[test]
    fn test_bool_validity() {
        let interpreter = BoolValidity;
        assert!(interpreter.is_valid(&true));
        assert!(!interpreter.is_valid(&false));
        assert!(interpreter.valid());
        assert_eq!(interpreter.rate(&true), 1.0);
        assert_eq!(interpreter.rate(&false), 0.0);
    }

    #[test]
    fn test_log_validity_rates_by_count() {
        let interpreter = LogValidity;
        assert_eq!(interpreter.rate(&ErrorLog::valid()), 1.0);

        let one = ErrorLog::from(KeywordError::new("type", json!("string"), json!(1)));
        assert_eq!(interpreter.rate(&one), 0.0);

        let two = ErrorLog::from(vec![
            KeywordError::new("type", json!("string"), json!(1)),
            KeywordError::new("const", json!("a"), json!(1)),
        ]);
        assert_eq!(interpreter.rate(&two), -1.0);
    }

    #[test]
    fn test_keyword_validity_negates_highest_priority() {
        let interpreter = KeywordValidity;
        assert_eq!(interpreter.rate(&ErrorLog::valid()), 1.0);

        let log = ErrorLog::from(vec![
            KeywordError::new("minimum", json!(5), json!(1)).with_priority(10),
            KeywordError::new("type", json!("number"), json!(1)).with_priority(100),
        ]);
        // Rated by the worst complaint: -(100).
        assert_eq!(interpreter.rate(&log), -100.0);
    }

    #[test]
    fn test_keyword_validity_prefers_less_authoritative_failure() {
        let interpreter = KeywordValidity;
        let type_failure =
            ErrorLog::from(KeywordError::new("type", json!("number"), json!("x")).with_priority(100));
        let const_failure =
            ErrorLog::from(KeywordError::new("const", json!(1), json!(2)).with_priority(150));
        assert!(interpreter.rate(&type_failure) > interpreter.rate(&const_failure));
    }
}
