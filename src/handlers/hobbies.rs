// handlers/hobbies.rs - /api/hobbies and /api/hobbies/:hobby_id
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::app::AppState;
use crate::database::models::{Hobby, HobbyCreate, HobbyPatch};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// POST /api/hobbies
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<HobbyCreate>, JsonRejection>,
) -> ApiResult<Hobby> {
    let Json(input) = payload?;
    let hobby = state.hobbies.create_hobby(&user.owner(), input).await?;
    Ok(ApiResponse::created(hobby))
}

/// GET /api/hobbies
pub async fn list(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Vec<Hobby>> {
    let hobbies = state.hobbies.list_hobbies(&user.owner()).await?;
    Ok(ApiResponse::success(hobbies))
}

/// GET /api/hobbies/:hobby_id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(hobby_id): Path<String>,
) -> ApiResult<Hobby> {
    let hobby = state.hobbies.get_hobby(&user.owner(), &hobby_id).await?;
    Ok(ApiResponse::success(hobby))
}

/// PUT /api/hobbies/:hobby_id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(hobby_id): Path<String>,
    payload: Result<Json<HobbyPatch>, JsonRejection>,
) -> ApiResult<Hobby> {
    let Json(patch) = payload?;
    let hobby = state.hobbies.update_hobby(&user.owner(), &hobby_id, patch).await?;
    Ok(ApiResponse::success(hobby))
}

/// DELETE /api/hobbies/:hobby_id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(hobby_id): Path<String>,
) -> ApiResult<()> {
    state.hobbies.delete_hobby(&user.owner(), &hobby_id).await?;
    Ok(ApiResponse::no_content())
}
