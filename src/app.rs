use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::handlers::{categories, hobbies, items, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::HobbyService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub hobbies: HobbyService,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(hobbies: HobbyService, verifier: TokenVerifier) -> Self {
        Self { hobbies, verifier: Arc::new(verifier) }
    }
}

/// Build the full router: public routes, the JWT-protected hobby tree, and global layers.
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let mut app = Router::new()
        .route("/", get(public::root))
        .route("/api/health", get(public::health))
        .merge(hobby_routes(state.clone()))
        .fallback(public::not_found)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config.security.cors_origins));

    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.with_state(state)
}

fn hobby_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/hobbies", post(hobbies::create).get(hobbies::list))
        .route(
            "/api/hobbies/:hobby_id",
            get(hobbies::get).put(hobbies::update).delete(hobbies::delete),
        )
        .route("/api/hobbies/:hobby_id/categories", post(categories::create))
        .route(
            "/api/hobbies/:hobby_id/categories/:category_name",
            put(categories::update).delete(categories::delete),
        )
        .route(
            "/api/hobbies/:hobby_id/categories/:category_name/items",
            post(items::create),
        )
        .route(
            "/api/hobbies/:hobby_id/categories/:category_name/items/:item_id",
            put(items::update).delete(items::delete),
        )
        .route_layer(from_fn_with_state(state.verifier, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}
