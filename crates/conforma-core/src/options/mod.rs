//! Schema options: labeled alternatives and best-match selection
//!
//! One layer above the enforcer factory: a schema fans out into candidate
//! subschemas, each paired with a label and a built enforcer, and a
//! runtime value picks the alternative it most plausibly represents.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

mod label;
mod splitter;

pub use label::SchemaLabeler;
pub use splitter::JsonSchemaSplitter;

use serde_json::Value;

use crate::constraint::ValueConstraint;
use crate::error::Result;
use crate::keyword::SchemaEnforcer;
use crate::schema::JsonSchemaEnforcerFactory;
use crate::validity::{KeywordValidity, Validity};

/// A named alternative presented to a caller for display or
/// disambiguation
#[derive(Debug, Clone)]
pub struct LabeledValue<T> {
    pub label: String,
    pub value: T,
}

/// Builds one labeled enforcer per subschema alternative
#[derive(Clone)]
pub struct SchemaOptionsFactory {
    splitter: Option<JsonSchemaSplitter>,
    enforcers: JsonSchemaEnforcerFactory,
    labeler: SchemaLabeler,
}

impl Default for SchemaOptionsFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaOptionsFactory {
    pub fn new() -> Self {
        Self {
            splitter: Some(JsonSchemaSplitter::new()),
            enforcers: JsonSchemaEnforcerFactory::new(),
            labeler: SchemaLabeler::new(),
        }
    }

    /// Replace the splitter; `None` treats every schema as unsplit
    pub fn with_splitter(mut self, splitter: Option<JsonSchemaSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn with_enforcer_factory(mut self, enforcers: JsonSchemaEnforcerFactory) -> Self {
        self.enforcers = enforcers;
        self
    }

    pub fn with_labeler(mut self, labeler: SchemaLabeler) -> Self {
        self.labeler = labeler;
        self
    }

    /// Decompose `schema` and build a labeled enforcer per alternative
    pub fn process(&self, schema: &Value) -> Result<Vec<LabeledValue<SchemaEnforcer>>> {
        let subschemas = match &self.splitter {
            Some(splitter) => splitter.process(schema),
            None => vec![schema.clone()],
        };
        subschemas
            .into_iter()
            .map(|subschema| {
                let enforcer = self.enforcers.process(&subschema)?;
                Ok(LabeledValue {
                    label: self.labeler.label(&subschema),
                    value: enforcer,
                })
            })
            .collect()
    }
}

/// Selects among built options by validity rating
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOptionsParser;

impl SchemaOptionsParser {
    pub fn new() -> Self {
        Self
    }

    /// The option with the strictly highest validity rating for `value`;
    /// ties keep the first-seen option
    pub fn get_most_valid_option<'a>(
        &self,
        options: &'a [LabeledValue<SchemaEnforcer>],
        value: &Value,
    ) -> Option<&'a LabeledValue<SchemaEnforcer>> {
        let interpreter = KeywordValidity;
        let mut best: Option<(f64, &LabeledValue<SchemaEnforcer>)> = None;
        for option in options {
            let rating = interpreter.rate(&option.value.validate(value));
            match &best {
                Some((best_rating, _)) if rating <= *best_rating => {}
                _ => best = Some((rating, option)),
            }
        }
        best.map(|(_, option)| option)
    }
}
