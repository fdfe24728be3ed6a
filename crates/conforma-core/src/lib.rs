//! Conforma Core - Schema-driven value validation and coercion engine
//!
//! Given a declarative JSON-Schema-like document and a runtime value,
//! this crate determines whether the value conforms, produces a
//! structured account of every way it does not, and - where possible -
//! transforms a non-conforming value into one that does conform.
//!
//! # Main Components
//!
//! - **Constraint primitive**: the validate/coerce contract every rule
//!   and enforcer implements
//! - **Pipeline combinators**: sequential coercion and short-circuiting
//!   validation composition over a pluggable validity interpreter
//! - **Primitive type enforcers**: per-JSON-type validate/coerce rules
//! - **Keyword rule engine**: priority-ranked keyword constraints merged
//!   into one enforcer, with branch forking for union types
//! - **JSON-Schema bindings**: `type`, `const`, and boolean-literal
//!   schemas over a curated vocabulary
//! - **Option splitting**: decompose a schema into labeled alternatives
//!   and select the best match for a value
//!
//! The engine performs no I/O: it consumes an already-parsed schema
//! document and a value, and returns data. Validation failures are data
//! (an [`ErrorLog`]), never errors; only enforcer *construction* can
//! fail.
//!
//! # Example
//!
//! ```
//! use conforma_core::{JsonSchemaEnforcerFactory, ValueConstraint};
//! use serde_json::json;
//!
//! fn main() -> conforma_core::Result<()> {
//!     let factory = JsonSchemaEnforcerFactory::new();
//!     let enforcer = factory.process(&json!({"type": "integer"}))?;
//!
//!     assert!(enforcer.validate(&json!(3)).is_valid());
//!     assert!(!enforcer.validate(&json!("3")).is_valid());
//!     assert_eq!(enforcer.coerce(&json!("2.6")), Some(json!(3)));
//!     Ok(())
//! }
//! ```

pub mod constraint;
pub mod error;
pub mod keyword;
pub mod options;
pub mod pipeline;
pub mod primitives;
pub mod report;
pub mod schema;
pub mod validity;

// Re-export main types for convenience
pub use constraint::{identity, CoerceFn, SharedConstraint, TypeConstraint, ValidateFn, ValueConstraint};
pub use error::{Error, Result};
pub use keyword::{
    DepthGuard, KeywordEnforcerFork, KeywordRule, KeywordValueEnforcer, RuleContext,
    SchemaEnforcer, SequentialKeywordEnforcerFactory, TypeKeywordEnforcer, TypeKeywordRule,
    MAX_SCHEMA_DEPTH, TYPE_PRIORITY,
};
pub use options::{
    JsonSchemaSplitter, LabeledValue, SchemaLabeler, SchemaOptionsFactory, SchemaOptionsParser,
};
pub use pipeline::{merge_coerce_steps, merge_validate_steps};
pub use report::{ErrorLog, KeywordError};
pub use schema::{
    ConstRule, JsonSchemaEnforcerFactory, SchemaType, TypeRule, TypeRuleTable, TypeSpec,
    CONST_PRIORITY,
};
pub use validity::{BoolValidity, KeywordValidity, LogValidity, Validity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_enforcer_is_shareable_across_threads() {
        let enforcer = JsonSchemaEnforcerFactory::new()
            .process(&json!({"type": "number"}))
            .unwrap();
        let handle = std::thread::spawn(move || enforcer.validate(&json!(1)).is_valid());
        assert!(handle.join().unwrap());
    }
}
