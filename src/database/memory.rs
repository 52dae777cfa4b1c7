//! In-process hobby store.
//!
//! Aggregates live in a map behind a single `RwLock`; every update runs under
//! the write lock, which makes each call atomic with respect to its filter.
//! Used by the test suite and by `STORE_BACKEND=memory`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{Hobby, NewHobby};
use crate::database::store::{HobbyLocator, HobbyStore, StoreError, StoreResult};
use crate::database::update::{HobbyUpdate, UpdateOutcome};

#[derive(Clone, Default)]
pub struct MemoryHobbyStore {
    hobbies: Arc<RwLock<HashMap<Uuid, Hobby>>>,
}

impl MemoryHobbyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.hobbies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.hobbies.read().await.is_empty()
    }
}

fn owned<'a>(hobby: &'a Hobby, locator: &HobbyLocator) -> Option<&'a Hobby> {
    (hobby.user_id == locator.user_id).then_some(hobby)
}

#[async_trait]
impl HobbyStore for MemoryHobbyStore {
    async fn create_hobby(&self, hobby: NewHobby) -> StoreResult<Hobby> {
        let hobby = hobby.into_hobby();
        self.hobbies.write().await.insert(hobby.id, hobby.clone());
        Ok(hobby)
    }

    async fn get_by_id(&self, locator: &HobbyLocator) -> StoreResult<Option<Hobby>> {
        let hobbies = self.hobbies.read().await;
        Ok(hobbies.get(&locator.hobby_id).and_then(|h| owned(h, locator)).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<Hobby>> {
        let hobbies = self.hobbies.read().await;
        let mut found: Vec<Hobby> = hobbies.values().filter(|h| h.user_id == user_id).cloned().collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn delete_hobby(&self, locator: &HobbyLocator) -> StoreResult<bool> {
        let mut hobbies = self.hobbies.write().await;
        let is_owner = hobbies.get(&locator.hobby_id).and_then(|h| owned(h, locator)).is_some();
        if is_owner {
            hobbies.remove(&locator.hobby_id);
        }
        Ok(is_owner)
    }

    async fn apply(&self, locator: &HobbyLocator, update: HobbyUpdate) -> StoreResult<Option<Hobby>> {
        let mut hobbies = self.hobbies.write().await;
        let Some(stored) = hobbies.get_mut(&locator.hobby_id) else {
            return Ok(None);
        };
        if stored.user_id != locator.user_id {
            return Ok(None);
        }

        // work on a copy so a rejected update cannot leave partial changes
        let mut next = stored.clone();
        match update.apply(&mut next, Utc::now()) {
            UpdateOutcome::Applied => {
                next.revision += 1;
                *stored = next.clone();
                Ok(Some(next))
            }
            UpdateOutcome::Unmatched => Ok(None),
            UpdateOutcome::Rejected(reason) => Err(StoreError::Rejected(reason)),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
