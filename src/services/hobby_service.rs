//! Hobby aggregate orchestration.
//!
//! Every mutation loads the caller's hobby, checks its preconditions against
//! that snapshot, validates item payloads against the category's current
//! schema, and then hands a targeted update to the store. The store re-checks
//! its own filters atomically, so a hobby or element that vanished in between
//! still comes back as not found.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::models::{
    Category, CategoryCreate, CategoryUpdate, Hobby, HobbyCreate, HobbyPatch, NewHobby, SubCategoryItem,
};
use crate::database::store::{HobbyLocator, HobbyStore};
use crate::database::update::CategoryPatch;
use crate::schema::{check_name, validate, CategorySchema, FieldDefinition};
use crate::services::error::{ServiceError, ServiceResult};
use crate::types::Owner;

#[derive(Clone)]
pub struct HobbyService {
    store: Arc<dyn HobbyStore>,
}

impl HobbyService {
    pub fn new(store: Arc<dyn HobbyStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn HobbyStore> {
        &self.store
    }

    pub async fn create_hobby(&self, owner: &Owner, input: HobbyCreate) -> ServiceResult<Hobby> {
        check_name("Hobby", &input.name).map_err(ServiceError::InvalidInput)?;

        let hobby = self
            .store
            .create_hobby(NewHobby {
                user_id: owner.user_id.clone(),
                name: input.name,
                description: input.description,
            })
            .await?;
        info!("Created hobby {} for user {}", hobby.id, owner.user_id);
        Ok(hobby)
    }

    pub async fn list_hobbies(&self, owner: &Owner) -> ServiceResult<Vec<Hobby>> {
        Ok(self.store.list_by_user(&owner.user_id).await?)
    }

    pub async fn get_hobby(&self, owner: &Owner, hobby_id: &str) -> ServiceResult<Hobby> {
        let locator = locate(owner, hobby_id)?;
        self.load(&locator).await
    }

    /// Apply a partial update. An empty patch returns the hobby as stored.
    pub async fn update_hobby(&self, owner: &Owner, hobby_id: &str, patch: HobbyPatch) -> ServiceResult<Hobby> {
        let locator = locate(owner, hobby_id)?;
        let hobby = self.load(&locator).await?;

        if patch.is_empty() {
            return Ok(hobby);
        }
        if let Some(name) = &patch.name {
            check_name("Hobby", name).map_err(ServiceError::InvalidInput)?;
        }

        let updated = self
            .store
            .update_hobby_fields(&locator, patch)
            .await?
            .ok_or_else(ServiceError::hobby_not_found)?;
        info!("Updated hobby {}", updated.id);
        Ok(updated)
    }

    pub async fn delete_hobby(&self, owner: &Owner, hobby_id: &str) -> ServiceResult<()> {
        let locator = locate(owner, hobby_id)?;
        self.load(&locator).await?;

        if !self.store.delete_hobby(&locator).await? {
            return Err(ServiceError::hobby_not_found());
        }
        info!("Deleted hobby {}", locator.hobby_id);
        Ok(())
    }

    pub async fn add_category(&self, owner: &Owner, hobby_id: &str, input: CategoryCreate) -> ServiceResult<Hobby> {
        check_name("Category", &input.name).map_err(ServiceError::InvalidInput)?;
        check_field_names(&input.fields)?;

        let locator = locate(owner, hobby_id)?;
        let hobby = self.load(&locator).await?;

        if hobby.has_category(&input.name) {
            debug!("Category '{}' already exists on hobby {}", input.name, hobby.id);
            return Err(ServiceError::Conflict(format!("Category '{}' already exists", input.name)));
        }

        let updated = self
            .store
            .add_category(&locator, Category::new(input.name.clone(), input.fields))
            .await?
            .ok_or_else(ServiceError::hobby_not_found)?;
        info!("Added category '{}' to hobby {}", input.name, updated.id);
        Ok(updated)
    }

    /// Rename a category and/or replace its field definitions.
    ///
    /// Existing items are not revalidated against new fields.
    pub async fn update_category(
        &self,
        owner: &Owner,
        hobby_id: &str,
        category_name: &str,
        input: CategoryUpdate,
    ) -> ServiceResult<Hobby> {
        if let Some(name) = &input.name {
            check_name("Category", name).map_err(ServiceError::InvalidInput)?;
        }
        if let Some(fields) = &input.fields {
            check_field_names(fields)?;
        }

        let locator = locate(owner, hobby_id)?;
        let hobby = self.load(&locator).await?;

        if !hobby.has_category(category_name) {
            debug!("Category '{}' missing on hobby {}", category_name, hobby.id);
            return Err(ServiceError::category_not_found(category_name));
        }
        if input.is_empty() {
            return Ok(hobby);
        }
        if let Some(name) = &input.name {
            if name != category_name && hobby.has_category(name) {
                return Err(ServiceError::Conflict(format!("Category '{}' already exists", name)));
            }
        }

        let schema_name = input.name.clone().unwrap_or_else(|| category_name.to_string());
        let patch = CategoryPatch {
            schema: input.fields.map(|fields| CategorySchema::new(schema_name, fields)),
            name: input.name,
        };

        let updated = self
            .store
            .update_category_fields(&locator, category_name, patch)
            .await?
            .ok_or_else(|| ServiceError::category_not_found(category_name))?;
        info!("Updated category '{}' on hobby {}", category_name, updated.id);
        Ok(updated)
    }

    pub async fn delete_category(&self, owner: &Owner, hobby_id: &str, category_name: &str) -> ServiceResult<Hobby> {
        let locator = locate(owner, hobby_id)?;
        let hobby = self.load(&locator).await?;

        if !hobby.has_category(category_name) {
            return Err(ServiceError::category_not_found(category_name));
        }

        let updated = self
            .store
            .delete_category(&locator, category_name)
            .await?
            .ok_or_else(|| ServiceError::category_not_found(category_name))?;
        info!("Deleted category '{}' from hobby {}", category_name, updated.id);
        Ok(updated)
    }

    pub async fn add_item(
        &self,
        owner: &Owner,
        hobby_id: &str,
        category_name: &str,
        data: Map<String, Value>,
    ) -> ServiceResult<Hobby> {
        let locator = locate(owner, hobby_id)?;
        let hobby = self.load(&locator).await?;

        let category = hobby
            .category(category_name)
            .ok_or_else(|| ServiceError::category_not_found(category_name))?;
        validate(&data, &category.schema)?;

        let item = SubCategoryItem::new(data);
        let item_id = item.id.clone();
        let updated = self
            .store
            .add_item(&locator, category_name, item)
            .await?
            .ok_or_else(|| ServiceError::category_not_found(category_name))?;
        info!("Added item {} to category '{}' on hobby {}", item_id, category_name, updated.id);
        Ok(updated)
    }

    /// Replace an item's data wholesale after validating it.
    pub async fn update_item(
        &self,
        owner: &Owner,
        hobby_id: &str,
        category_name: &str,
        item_id: &str,
        data: Map<String, Value>,
    ) -> ServiceResult<Hobby> {
        let locator = locate(owner, hobby_id)?;
        let hobby = self.load(&locator).await?;

        let category = hobby
            .category(category_name)
            .ok_or_else(|| ServiceError::category_not_found(category_name))?;
        if category.item(item_id).is_none() {
            debug!("Item {} missing in category '{}' on hobby {}", item_id, category_name, hobby.id);
            return Err(ServiceError::item_not_found());
        }
        validate(&data, &category.schema)?;

        let updated = self
            .store
            .update_item(&locator, category_name, item_id, data)
            .await?
            .ok_or_else(ServiceError::item_not_found)?;
        info!("Updated item {} in category '{}' on hobby {}", item_id, category_name, updated.id);
        Ok(updated)
    }

    pub async fn delete_item(
        &self,
        owner: &Owner,
        hobby_id: &str,
        category_name: &str,
        item_id: &str,
    ) -> ServiceResult<Hobby> {
        let locator = locate(owner, hobby_id)?;
        let hobby = self.load(&locator).await?;

        let category = hobby
            .category(category_name)
            .ok_or_else(|| ServiceError::category_not_found(category_name))?;
        if category.item(item_id).is_none() {
            return Err(ServiceError::item_not_found());
        }

        let updated = self
            .store
            .delete_item(&locator, category_name, item_id)
            .await?
            .ok_or_else(ServiceError::item_not_found)?;
        info!("Deleted item {} from category '{}' on hobby {}", item_id, category_name, updated.id);
        Ok(updated)
    }

    async fn load(&self, locator: &HobbyLocator) -> ServiceResult<Hobby> {
        self.store.get_by_id(locator).await?.ok_or_else(|| {
            debug!("Hobby {} not found for user {}", locator.hobby_id, locator.user_id);
            ServiceError::hobby_not_found()
        })
    }
}

/// Malformed ids cannot name a stored hobby, so they are simply not found.
fn locate(owner: &Owner, hobby_id: &str) -> ServiceResult<HobbyLocator> {
    let id = Uuid::parse_str(hobby_id).map_err(|_| ServiceError::hobby_not_found())?;
    Ok(HobbyLocator::new(id, owner.user_id.clone()))
}

fn check_field_names(fields: &[FieldDefinition]) -> ServiceResult<()> {
    for field in fields {
        check_name("Field", &field.name).map_err(ServiceError::InvalidInput)?;
    }
    Ok(())
}
