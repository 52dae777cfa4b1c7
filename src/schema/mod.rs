//! User-defined category schemas: the closed field type set, field
//! definitions, and validation of item payloads against them.

pub mod definition;
pub mod field_type;
pub mod validator;

pub use definition::{check_name, CategorySchema, FieldDefinition, MAX_NAME_LEN};
pub use field_type::{matches, FieldType};
pub use validator::{validate, SchemaViolation, ValidationReport};
