use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{Claims, TokenVerifier};
use crate::error::ApiError;
use crate::types::Owner;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub active: bool,
}

impl AuthUser {
    pub fn owner(&self) -> Owner {
        Owner::new(self.user_id.clone())
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            active: claims.active,
        }
    }
}

/// JWT authentication middleware that validates tokens and injects [`AuthUser`].
/// Inactive accounts are turned away before any handler runs.
pub async fn jwt_auth_middleware(
    State(verifier): State<Arc<TokenVerifier>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = verifier.verify(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::unauthorized("Could not validate credentials")
    })?;

    let auth_user = AuthUser::from(claims);
    if !auth_user.active {
        tracing::debug!("Inactive user {} refused", auth_user.user_id);
        return Err(ApiError::bad_request("Inactive user"));
    }

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}
