#![allow(dead_code)]

use std::sync::{Arc, Once};

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Map, Value};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use hobbees_api::app::{router, AppState};
use hobbees_api::auth::{Claims, TokenVerifier};
use hobbees_api::config::AppConfig;
use hobbees_api::database::models::{CategoryCreate, FieldDefinition, FieldType, Hobby, HobbyCreate};
use hobbees_api::database::MemoryHobbyStore;
use hobbees_api::services::HobbyService;
use hobbees_api::types::Owner;

pub const JWT_SECRET: &str = "hobbees-test-secret";

static TRACING: Once = Once::new();

/// Route crate logs through the test harness; quiet unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
            .with_test_writer()
            .try_init();
    });
}

pub fn service() -> HobbyService {
    init_tracing();
    HobbyService::new(Arc::new(MemoryHobbyStore::new()))
}

pub fn owner(user_id: &str) -> Owner {
    Owner::new(user_id)
}

/// Payload helper; panics on non-object literals.
pub fn data(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("item data must be a JSON object")
}

/// The `Latex` category used across the scenarios.
pub fn latex_category() -> CategoryCreate {
    CategoryCreate {
        name: "Latex".to_string(),
        fields: vec![
            FieldDefinition::required("Brand", FieldType::Text),
            FieldDefinition::required("Thickness", FieldType::Number),
            FieldDefinition::optional("Quantity", FieldType::Number),
        ],
    }
}

pub async fn hobby_with_latex(svc: &HobbyService, owner: &Owner) -> Result<Hobby> {
    let hobby = svc
        .create_hobby(owner, HobbyCreate { name: "Slingshot".to_string(), description: None })
        .await?;
    Ok(svc.add_category(owner, &hobby.id.to_string(), latex_category()).await?)
}

pub fn token(user_id: &str, active: bool) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        active,
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(JWT_SECRET.as_bytes()))
        .expect("failed to sign test token")
}

pub fn app() -> Router {
    let mut config = AppConfig::from_env();
    config.api.enable_request_logging = false;
    config.api.max_request_size_bytes = 64 * 1024;
    let verifier = TokenVerifier::new(JWT_SECRET).expect("test secret is not empty");
    router(AppState::new(service(), verifier), &config)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Send one request through the router. `token` adds a bearer header.
pub async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { json!(null) } else { serde_json::from_slice(&bytes)? };
    Ok(TestResponse { status, body })
}
