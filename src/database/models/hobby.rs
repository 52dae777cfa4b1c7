use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub use crate::schema::{CategorySchema, FieldDefinition, FieldType};

/// One user-entered entry inside a category. `data` is free-form at rest; it
/// is only checked against the category schema when written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategoryItem {
    pub id: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubCategoryItem {
    pub fn new(data: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            data,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub schema: CategorySchema,
    #[serde(default)]
    pub items: Vec<SubCategoryItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// A new, empty category whose schema is built from `fields`.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            schema: CategorySchema::new(name.clone(), fields),
            name,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&SubCategoryItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

/// The aggregate root. Everything nested inside is stored and mutated with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hobby {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Bumped on every write; used for optimistic replacement of the document.
    #[serde(default)]
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hobby {
    /// First category with the given name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.category(name).is_some()
    }
}

/// Everything needed to insert a fresh hobby; the store assigns the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHobby {
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
}

impl NewHobby {
    pub fn into_hobby(self) -> Hobby {
        let now = Utc::now();
        Hobby {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            categories: Vec::new(),
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
