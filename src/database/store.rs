//! The aggregate store contract.
//!
//! Every read and write is scoped by a [`HobbyLocator`], so a request can only
//! ever see or change hobbies owned by its caller. Writes are expressed as a
//! [`HobbyUpdate`] and applied atomically against the stored aggregate; a
//! locator or nested filter that matches nothing comes back as `Ok(None)`.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, Hobby, HobbyPatch, NewHobby, SubCategoryItem};
use crate::database::update::{CategoryFilter, CategoryPatch, HobbyUpdate, ItemFilter, UpdateRejection};

/// Owner-scoped address of one hobby.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HobbyLocator {
    pub hobby_id: Uuid,
    pub user_id: String,
}

impl HobbyLocator {
    pub fn new(hobby_id: Uuid, user_id: impl Into<String>) -> Self {
        Self { hobby_id, user_id: user_id.into() }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("hobby {hobby_id} kept changing underneath the update; gave up after {attempts} attempts")]
    Contention { hobby_id: Uuid, attempts: u32 },

    #[error(transparent)]
    Rejected(#[from] UpdateRejection),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(DatabaseError::Sqlx(err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait HobbyStore: Send + Sync {
    /// Insert a new hobby and return it as stored.
    async fn create_hobby(&self, hobby: NewHobby) -> StoreResult<Hobby>;

    async fn get_by_id(&self, locator: &HobbyLocator) -> StoreResult<Option<Hobby>>;

    /// All hobbies owned by `user_id`, oldest first.
    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<Hobby>>;

    /// Returns whether a hobby was removed.
    async fn delete_hobby(&self, locator: &HobbyLocator) -> StoreResult<bool>;

    /// Atomically apply `update` to the located hobby and return the result.
    async fn apply(&self, locator: &HobbyLocator, update: HobbyUpdate) -> StoreResult<Option<Hobby>>;

    /// Cheap connectivity probe for health checks.
    async fn ping(&self) -> StoreResult<()>;

    async fn update_hobby_fields(&self, locator: &HobbyLocator, patch: HobbyPatch) -> StoreResult<Option<Hobby>> {
        self.apply(locator, HobbyUpdate::SetHobbyFields(patch)).await
    }

    /// Append a category. Fails with [`StoreError::Rejected`] if the name is taken.
    async fn add_category(&self, locator: &HobbyLocator, category: Category) -> StoreResult<Option<Hobby>> {
        self.apply(locator, HobbyUpdate::PushCategory(category)).await
    }

    async fn update_category_fields(
        &self,
        locator: &HobbyLocator,
        category_name: &str,
        patch: CategoryPatch,
    ) -> StoreResult<Option<Hobby>> {
        let update = HobbyUpdate::SetCategoryFields { category: CategoryFilter::name(category_name), patch };
        self.apply(locator, update).await
    }

    async fn delete_category(&self, locator: &HobbyLocator, category_name: &str) -> StoreResult<Option<Hobby>> {
        let update = HobbyUpdate::PullCategory { category: CategoryFilter::name(category_name) };
        self.apply(locator, update).await
    }

    async fn add_item(
        &self,
        locator: &HobbyLocator,
        category_name: &str,
        item: SubCategoryItem,
    ) -> StoreResult<Option<Hobby>> {
        let update = HobbyUpdate::PushItem { category: CategoryFilter::name(category_name), item };
        self.apply(locator, update).await
    }

    async fn update_item(
        &self,
        locator: &HobbyLocator,
        category_name: &str,
        item_id: &str,
        data: Map<String, Value>,
    ) -> StoreResult<Option<Hobby>> {
        let update = HobbyUpdate::SetItemData {
            category: CategoryFilter::name(category_name),
            item: ItemFilter::id(item_id),
            data,
        };
        self.apply(locator, update).await
    }

    async fn delete_item(
        &self,
        locator: &HobbyLocator,
        category_name: &str,
        item_id: &str,
    ) -> StoreResult<Option<Hobby>> {
        let update = HobbyUpdate::PullItem {
            category: CategoryFilter::name(category_name),
            item: ItemFilter::id(item_id),
        };
        self.apply(locator, update).await
    }
}
