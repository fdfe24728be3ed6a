//! Error types for the conforma core library
//!
//! These errors cover enforcer *construction* only. A value that fails
//! validation is never an `Err`; it is reported as data through
//! [`crate::report::ErrorLog`].

use thiserror::Error;

/// Main error type for enforcer construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Schema nesting exceeded the configured recursion bound
    #[error("schema too deep: nesting exceeds the configured limit of {max_depth}")]
    SchemaTooDeep { max_depth: usize },

    /// Schema document is neither a boolean literal nor an object
    #[error("invalid schema document: {message}")]
    InvalidSchema { message: String },

    /// A `type` keyword named a type outside the supported vocabulary
    #[error("unknown schema type: '{name}'")]
    UnknownType { name: String },
}

impl Error {
    /// Create an `InvalidSchema` error from any message
    pub fn invalid_schema<M: Into<String>>(message: M) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;
