// handlers/categories.rs - /api/hobbies/:hobby_id/categories[/:category_name]
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::app::AppState;
use crate::database::models::{CategoryCreate, CategoryUpdate, Hobby};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// POST /api/hobbies/:hobby_id/categories
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(hobby_id): Path<String>,
    payload: Result<Json<CategoryCreate>, JsonRejection>,
) -> ApiResult<Hobby> {
    let Json(input) = payload?;
    let hobby = state.hobbies.add_category(&user.owner(), &hobby_id, input).await?;
    Ok(ApiResponse::created(hobby))
}

/// PUT /api/hobbies/:hobby_id/categories/:category_name
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((hobby_id, category_name)): Path<(String, String)>,
    payload: Result<Json<CategoryUpdate>, JsonRejection>,
) -> ApiResult<Hobby> {
    let Json(input) = payload?;
    let hobby = state
        .hobbies
        .update_category(&user.owner(), &hobby_id, &category_name, input)
        .await?;
    Ok(ApiResponse::success(hobby))
}

/// DELETE /api/hobbies/:hobby_id/categories/:category_name
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((hobby_id, category_name)): Path<(String, String)>,
) -> ApiResult<Hobby> {
    let hobby = state
        .hobbies
        .delete_category(&user.owner(), &hobby_id, &category_name)
        .await?;
    Ok(ApiResponse::success(hobby))
}
