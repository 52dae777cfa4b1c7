use serde::{Deserialize, Serialize};

use super::field_type::FieldType;

/// Longest name accepted for fields, categories and hobbies.
pub const MAX_NAME_LEN: usize = 100;

/// A single user-defined field in a category schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self { name: name.into(), field_type, required }
    }

    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, field_type, true)
    }

    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, field_type, false)
    }
}

/// Field definitions governing the items of one category.
///
/// Duplicate field names are kept as given; every copy is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySchema {
    pub category_name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl CategorySchema {
    pub fn new(category_name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self { category_name: category_name.into(), fields }
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// Check that a user-supplied name is between 1 and [`MAX_NAME_LEN`] characters.
pub fn check_name(kind: &str, name: &str) -> Result<(), String> {
    let len = name.chars().count();
    if len == 0 {
        return Err(format!("{} name must not be empty", kind));
    }
    if len > MAX_NAME_LEN {
        return Err(format!("{} name must be at most {} characters", kind, MAX_NAME_LEN));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_defaults_to_false() {
        let def: FieldDefinition =
            serde_json::from_value(json!({"name": "Colour", "field_type": "text"})).unwrap();
        assert!(!def.required);
    }

    #[test]
    fn name_bounds() {
        assert!(check_name("Category", "Latex").is_ok());
        assert!(check_name("Category", "").is_err());
        assert!(check_name("Category", &"x".repeat(100)).is_ok());
        assert!(check_name("Category", &"x".repeat(101)).is_err());
        // counted in characters, not bytes
        assert!(check_name("Category", &"ü".repeat(100)).is_ok());
    }
}
