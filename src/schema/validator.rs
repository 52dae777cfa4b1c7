//! Item payload validation against a category schema.
//!
//! Required fields are checked first, then the type of every declared field
//! that is present. Keys the schema does not declare pass through untouched,
//! and the payload is never coerced or rewritten.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use super::definition::CategorySchema;
use super::field_type::FieldType;

/// A single reason an item payload does not satisfy its schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("Required field '{0}' is missing")]
    MissingRequiredField(String),

    #[error("Field '{field}' has invalid type. Expected {expected}")]
    InvalidFieldType { field: String, expected: FieldType },
}

impl SchemaViolation {
    pub fn field(&self) -> &str {
        match self {
            SchemaViolation::MissingRequiredField(field) => field,
            SchemaViolation::InvalidFieldType { field, .. } => field,
        }
    }
}

/// Every violation found in one payload, in check order.
///
/// Displays as the first violation so callers get a single headline reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<SchemaViolation>,
}

impl ValidationReport {
    pub fn first(&self) -> &SchemaViolation {
        // constructed only with at least one violation
        &self.violations[0]
    }

    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }

    /// Per-field messages; the first message recorded for a field wins.
    pub fn field_errors(&self) -> HashMap<String, String> {
        let mut errors = HashMap::new();
        for violation in &self.violations {
            errors
                .entry(violation.field().to_string())
                .or_insert_with(|| violation.to_string());
        }
        errors
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first())
    }
}

impl std::error::Error for ValidationReport {}

/// Collect every violation of `schema` in `payload`.
pub fn violations(payload: &Map<String, Value>, schema: &CategorySchema) -> Vec<SchemaViolation> {
    let mut found = Vec::new();

    for def in schema.required_fields() {
        if !payload.contains_key(&def.name) {
            found.push(SchemaViolation::MissingRequiredField(def.name.clone()));
        }
    }

    for def in &schema.fields {
        if let Some(value) = payload.get(&def.name) {
            if !def.field_type.matches(value) {
                found.push(SchemaViolation::InvalidFieldType {
                    field: def.name.clone(),
                    expected: def.field_type,
                });
            }
        }
    }

    found
}

/// Accept or reject an item payload against a category schema.
pub fn validate(payload: &Map<String, Value>, schema: &CategorySchema) -> Result<(), ValidationReport> {
    let violations = violations(payload, schema);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationReport { violations })
    }
}
