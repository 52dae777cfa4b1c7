//! Runs against a real database only when HOBBEES_TEST_DATABASE_URL is set.
mod common;

use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use serde_json::json;

use hobbees_api::config::DatabaseConfig;
use hobbees_api::database::models::{Category, NewHobby, SubCategoryItem};
use hobbees_api::database::{DatabaseManager, HobbyLocator, HobbyStore, PgHobbyStore, StoreError};
use hobbees_api::services::{ErrorKind, HobbyService};

use common::{data, hobby_with_latex, owner};

async fn store() -> Result<Option<PgHobbyStore>> {
    let Ok(url) = std::env::var("HOBBEES_TEST_DATABASE_URL") else {
        eprintln!("HOBBEES_TEST_DATABASE_URL not set; skipping");
        return Ok(None);
    };
    let config = DatabaseConfig { url: Some(url), max_connections: 5, connection_timeout: 10 };
    let pool = DatabaseManager::connect(&config).await?;
    DatabaseManager::bootstrap(&pool).await?;
    Ok(Some(PgHobbyStore::new(pool, 50)))
}

fn new_hobby(user: &str) -> NewHobby {
    NewHobby { user_id: user.to_string(), name: "Slingshot".to_string(), description: None }
}

#[tokio::test]
async fn rows_round_trip_with_nested_categories() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let user = format!("pg-{}", uuid::Uuid::new_v4());

    let hobby = store.create_hobby(new_hobby(&user)).await?;
    let locator = HobbyLocator::new(hobby.id, user.clone());
    store.add_category(&locator, Category::new("Latex", vec![])).await?;
    let with_item = store
        .add_item(&locator, "Latex", SubCategoryItem::new(data(json!({"Brand": "X"}))))
        .await?
        .expect("hobby exists");
    assert_eq!(with_item.revision, 2);

    let loaded = store.get_by_id(&locator).await?.expect("hobby exists");
    assert_eq!(loaded.categories, with_item.categories);
    assert_eq!(store.list_by_user(&user).await?.len(), 1);
    assert!(store.get_by_id(&HobbyLocator::new(hobby.id, "someone-else")).await?.is_none());

    let err = store.add_category(&locator, Category::new("Latex", vec![])).await.unwrap_err();
    assert!(matches!(err, StoreError::Rejected(_)));

    assert!(store.delete_hobby(&locator).await?);
    assert!(!store.delete_hobby(&locator).await?);
    Ok(())
}

#[tokio::test]
async fn concurrent_writers_all_land_through_revision_retries() -> Result<()> {
    let Some(store) = store().await? else { return Ok(()) };
    let svc = HobbyService::new(Arc::new(store));
    let alice = owner(&format!("pg-{}", uuid::Uuid::new_v4()));
    let hobby = hobby_with_latex(&svc, &alice).await?;
    let id = hobby.id.to_string();

    let adds = (0..6).map(|n| {
        let svc = svc.clone();
        let alice = alice.clone();
        let id = id.clone();
        async move { svc.add_item(&alice, &id, "Latex", data(json!({"Brand": format!("B{}", n), "Thickness": n}))).await }
    });
    for result in join_all(adds).await {
        result?;
    }

    let stored = svc.get_hobby(&alice, &id).await?;
    assert_eq!(stored.category("Latex").map(|c| c.items.len()), Some(6));

    let dupes = (0..4).map(|_| {
        let svc = svc.clone();
        let alice = alice.clone();
        let id = id.clone();
        async move { svc.add_category(&alice, &id, common::latex_category()).await }
    });
    for result in join_all(dupes).await {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Conflict);
    }

    svc.delete_hobby(&alice, &id).await?;
    Ok(())
}
