use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of value types a category field may declare.
///
/// Anything outside this enum fails to deserialize, so an unknown type can
/// never reach a stored schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
        }
    }

    /// Check a runtime value against this declared type.
    ///
    /// `null` always matches: whether a field may be absent is the validator's
    /// concern, not the type's. Dates are only checked for being strings; the
    /// calendar value itself is never parsed.
    pub fn matches(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }

        match self {
            FieldType::Text => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Date => value.is_string(),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-function form of [`FieldType::matches`].
pub fn matches(value: &Value, field_type: FieldType) -> bool {
    field_type.matches(value)
}
