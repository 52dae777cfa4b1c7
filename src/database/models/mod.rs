pub mod hobby;
pub mod payload;

pub use hobby::{Category, CategorySchema, FieldDefinition, FieldType, Hobby, NewHobby, SubCategoryItem};
pub use payload::{CategoryCreate, CategoryUpdate, HobbyCreate, HobbyPatch, ItemPayload};
