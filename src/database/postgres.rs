//! PostgreSQL hobby store.
//!
//! One row per hobby with the category tree in a JSONB column. Updates read
//! the row, apply the [`HobbyUpdate`] in memory and write it back guarded by
//! the row's `revision`; a concurrent writer makes the guard fail and the
//! update is re-applied to the fresh row.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Category, Hobby, NewHobby};
use crate::database::store::{HobbyLocator, HobbyStore, StoreError, StoreResult};
use crate::database::update::{HobbyUpdate, UpdateOutcome};

const COLUMNS: &str = "id, user_id, name, description, categories, revision, created_at, updated_at";

#[derive(Debug, FromRow)]
struct HobbyRow {
    id: Uuid,
    user_id: String,
    name: String,
    description: Option<String>,
    categories: Json<Vec<Category>>,
    revision: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HobbyRow> for Hobby {
    fn from(row: HobbyRow) -> Self {
        Hobby {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            categories: row.categories.0,
            revision: row.revision,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgHobbyStore {
    pool: PgPool,
    max_retries: u32,
}

impl PgHobbyStore {
    pub fn new(pool: PgPool, max_retries: u32) -> Self {
        Self { pool, max_retries: max_retries.max(1) }
    }

    async fn fetch(&self, locator: &HobbyLocator) -> StoreResult<Option<Hobby>> {
        let sql = format!("SELECT {} FROM hobbies WHERE id = $1 AND user_id = $2", COLUMNS);
        let row = sqlx::query_as::<_, HobbyRow>(&sql)
            .bind(locator.hobby_id)
            .bind(&locator.user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Hobby::from))
    }

    /// Replace the row if it is still at `expected`; `None` means another writer got there first.
    async fn replace(&self, hobby: &Hobby, expected: i64) -> StoreResult<Option<Hobby>> {
        let sql = format!(
            "UPDATE hobbies SET name = $3, description = $4, categories = $5, \
             revision = revision + 1, updated_at = $6 \
             WHERE id = $1 AND user_id = $2 AND revision = $7 \
             RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, HobbyRow>(&sql)
            .bind(hobby.id)
            .bind(&hobby.user_id)
            .bind(&hobby.name)
            .bind(&hobby.description)
            .bind(Json(&hobby.categories))
            .bind(hobby.updated_at)
            .bind(expected)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Hobby::from))
    }
}

#[async_trait]
impl HobbyStore for PgHobbyStore {
    async fn create_hobby(&self, hobby: NewHobby) -> StoreResult<Hobby> {
        let hobby = hobby.into_hobby();
        let sql = format!(
            "INSERT INTO hobbies ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            COLUMNS, COLUMNS
        );
        let row = sqlx::query_as::<_, HobbyRow>(&sql)
            .bind(hobby.id)
            .bind(&hobby.user_id)
            .bind(&hobby.name)
            .bind(&hobby.description)
            .bind(Json(&hobby.categories))
            .bind(hobby.revision)
            .bind(hobby.created_at)
            .bind(hobby.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn get_by_id(&self, locator: &HobbyLocator) -> StoreResult<Option<Hobby>> {
        self.fetch(locator).await
    }

    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<Hobby>> {
        let sql = format!("SELECT {} FROM hobbies WHERE user_id = $1 ORDER BY created_at, id", COLUMNS);
        let rows = sqlx::query_as::<_, HobbyRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Hobby::from).collect())
    }

    async fn delete_hobby(&self, locator: &HobbyLocator) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM hobbies WHERE id = $1 AND user_id = $2")
            .bind(locator.hobby_id)
            .bind(&locator.user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn apply(&self, locator: &HobbyLocator, update: HobbyUpdate) -> StoreResult<Option<Hobby>> {
        for attempt in 1..=self.max_retries {
            let Some(current) = self.fetch(locator).await? else {
                return Ok(None);
            };

            // stamp at timestamptz precision (microseconds)
            let mut next = current.clone();
            match update.apply(&mut next, Utc::now().trunc_subsecs(6)) {
                UpdateOutcome::Applied => {}
                UpdateOutcome::Unmatched => return Ok(None),
                UpdateOutcome::Rejected(reason) => return Err(StoreError::Rejected(reason)),
            }

            if let Some(stored) = self.replace(&next, current.revision).await? {
                return Ok(Some(stored));
            }
            debug!(
                "Revision {} of hobby {} moved during {}; attempt {}/{}",
                current.revision,
                locator.hobby_id,
                update.kind(),
                attempt,
                self.max_retries
            );
        }

        warn!("Giving up on {} for hobby {} after {} attempts", update.kind(), locator.hobby_id, self.max_retries);
        Err(StoreError::Contention { hobby_id: locator.hobby_id, attempts: self.max_retries })
    }

    async fn ping(&self) -> StoreResult<()> {
        DatabaseManager::health_check(&self.pool).await?;
        Ok(())
    }
}
