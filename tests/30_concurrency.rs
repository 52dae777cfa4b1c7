mod common;

use anyhow::Result;
use futures::future::join_all;
use serde_json::json;

use hobbees_api::database::models::CategoryCreate;
use hobbees_api::services::ErrorKind;

use common::{data, hobby_with_latex, owner, service};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_category_adds_yield_one_winner() -> Result<()> {
    let svc = service();
    let alice = owner("alice");
    let hobby = hobby_with_latex(&svc, &alice).await?;
    let id = hobby.id.to_string();

    let attempts = (0..8).map(|_| {
        let svc = svc.clone();
        let alice = alice.clone();
        let id = id.clone();
        tokio::spawn(async move {
            svc.add_category(&alice, &id, CategoryCreate { name: "Ammo".into(), fields: vec![] })
                .await
        })
    });
    let results = join_all(attempts).await;

    let mut wins = 0;
    for result in results {
        match result? {
            Ok(_) => wins += 1,
            Err(err) => assert_eq!(err.kind(), ErrorKind::Conflict),
        }
    }
    assert_eq!(wins, 1);

    let stored = svc.get_hobby(&alice, &id).await?;
    assert_eq!(stored.categories.iter().filter(|c| c.name == "Ammo").count(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_item_updates_are_last_write_wins() -> Result<()> {
    let svc = service();
    let alice = owner("alice");
    let hobby = hobby_with_latex(&svc, &alice).await?;
    let id = hobby.id.to_string();
    let created = svc.add_item(&alice, &id, "Latex", data(json!({"Brand": "X", "Thickness": 0}))).await?;
    let item_id = created.categories[0].items[0].id.clone();

    let writers = (1..=10).map(|n| {
        let svc = svc.clone();
        let alice = alice.clone();
        let id = id.clone();
        let item_id = item_id.clone();
        tokio::spawn(async move {
            svc.update_item(&alice, &id, "Latex", &item_id, data(json!({"Brand": format!("B{}", n), "Thickness": n})))
                .await
        })
    });
    let mut written = Vec::new();
    for result in join_all(writers).await {
        written.push(result??);
    }

    // every write landed whole; the survivor is whichever committed last
    let last = written.iter().max_by_key(|h| h.revision).map(|h| h.categories[0].items[0].clone());
    let stored = svc.get_hobby(&alice, &id).await?;
    let item = &stored.categories[0].items[0];
    assert_eq!(Some(item.clone()), last);
    let n = item.data["Thickness"].as_i64().unwrap_or_default();
    assert_eq!(item.data["Brand"], format!("B{}", n));
    assert_eq!(stored.categories[0].items.len(), 1);
    Ok(())
}
