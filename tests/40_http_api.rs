mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, send, token};

#[tokio::test]
async fn root_and_health_are_public() -> Result<()> {
    let app = app();

    let root = send(&app, Method::GET, "/", None, None).await?;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.body["success"], true);

    let health = send(&app, Method::GET, "/api/health", None, None).await?;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn hobby_routes_require_a_valid_active_token() -> Result<()> {
    let app = app();

    let missing = send(&app, Method::GET, "/api/hobbies", None, None).await?;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["code"], "UNAUTHORIZED");

    let garbage = send(&app, Method::GET, "/api/hobbies", Some("not.a.jwt"), None).await?;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let inactive = send(&app, Method::GET, "/api/hobbies", Some(token("alice", false).as_str()), None).await?;
    assert_eq!(inactive.status, StatusCode::BAD_REQUEST);
    assert_eq!(inactive.body["message"], "Inactive user");
    Ok(())
}

#[tokio::test]
async fn full_hobby_tree_over_http() -> Result<()> {
    let app = app();
    let alice = token("alice", true);
    let auth = Some(alice.as_str());

    let created = send(&app, Method::POST, "/api/hobbies", auth, Some(json!({"name": "Slingshot"}))).await?;
    assert_eq!(created.status, StatusCode::CREATED);
    let hobby_id = created.body["data"]["id"].as_str().unwrap_or_default().to_string();
    let hobby_uri = format!("/api/hobbies/{}", hobby_id);

    let category = json!({
        "name": "Latex",
        "fields": [
            {"name": "Brand", "field_type": "text", "required": true},
            {"name": "Thickness", "field_type": "number", "required": true},
            {"name": "Quantity", "field_type": "number"}
        ]
    });
    let added = send(&app, Method::POST, &format!("{}/categories", hobby_uri), auth, Some(category.clone())).await?;
    assert_eq!(added.status, StatusCode::CREATED);

    let duplicate = send(&app, Method::POST, &format!("{}/categories", hobby_uri), auth, Some(category)).await?;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["message"], "Category 'Latex' already exists");

    let items_uri = format!("{}/categories/Latex/items", hobby_uri);
    let invalid = send(&app, Method::POST, &items_uri, auth, Some(json!({"data": {"Brand": 5, "Thickness": 0.4}}))).await?;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["code"], "VALIDATION_ERROR");
    assert_eq!(invalid.body["field_errors"]["Brand"], "Field 'Brand' has invalid type. Expected text");

    let item = send(&app, Method::POST, &items_uri, auth, Some(json!({"data": {"Brand": "X", "Thickness": 0.4}}))).await?;
    assert_eq!(item.status, StatusCode::CREATED);
    let item_id = item.body["data"]["categories"][0]["items"][0]["id"].as_str().unwrap_or_default().to_string();

    let updated = send(
        &app,
        Method::PUT,
        &format!("{}/{}", items_uri, item_id),
        auth,
        Some(json!({"data": {"Brand": "Y", "Thickness": 0.5}})),
    )
    .await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["categories"][0]["items"][0]["data"]["Brand"], "Y");

    let gone = send(&app, Method::DELETE, &format!("{}/missing", items_uri), auth, None).await?;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["message"], "Item not found");

    let renamed = send(
        &app,
        Method::PUT,
        &format!("{}/categories/Latex", hobby_uri),
        auth,
        Some(json!({"name": "Bands"})),
    )
    .await?;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["data"]["categories"][0]["schema"]["category_name"], "Bands");

    let deleted = send(&app, Method::DELETE, &hobby_uri, auth, None).await?;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let after = send(&app, Method::GET, &hobby_uri, auth, None).await?;
    assert_eq!(after.status, StatusCode::NOT_FOUND);
    assert_eq!(after.body["message"], "Hobby not found");
    Ok(())
}

#[tokio::test]
async fn hobbies_are_private_to_their_owner() -> Result<()> {
    let app = app();
    let alice = token("alice", true);
    let bob = token("bob", true);

    let created = send(&app, Method::POST, "/api/hobbies", Some(alice.as_str()), Some(json!({"name": "Slingshot"}))).await?;
    let hobby_id = created.body["data"]["id"].as_str().unwrap_or_default().to_string();

    let peek = send(&app, Method::GET, &format!("/api/hobbies/{}", hobby_id), Some(bob.as_str()), None).await?;
    assert_eq!(peek.status, StatusCode::NOT_FOUND);

    let listed = send(&app, Method::GET, "/api/hobbies", Some(bob.as_str()), None).await?;
    assert_eq!(listed.body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn bad_bodies_and_ids_are_reported() -> Result<()> {
    let app = app();
    let alice = token("alice", true);

    let malformed_id = send(&app, Method::GET, "/api/hobbies/12345", Some(alice.as_str()), None).await?;
    assert_eq!(malformed_id.status, StatusCode::NOT_FOUND);

    let no_name = send(&app, Method::POST, "/api/hobbies", Some(alice.as_str()), Some(json!({"description": "x"}))).await?;
    assert_eq!(no_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_name.body["code"], "INVALID_JSON");

    let empty_name = send(&app, Method::POST, "/api/hobbies", Some(alice.as_str()), Some(json!({"name": ""}))).await?;
    assert_eq!(empty_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty_name.body["code"], "VALIDATION_ERROR");
    Ok(())
}
