// handlers/items.rs - /api/hobbies/:hobby_id/categories/:category_name/items[/:item_id]
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::app::AppState;
use crate::database::models::{Hobby, ItemPayload};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// POST /api/hobbies/:hobby_id/categories/:category_name/items
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((hobby_id, category_name)): Path<(String, String)>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> ApiResult<Hobby> {
    let Json(item) = payload?;
    let hobby = state
        .hobbies
        .add_item(&user.owner(), &hobby_id, &category_name, item.data)
        .await?;
    Ok(ApiResponse::created(hobby))
}

/// PUT /api/hobbies/:hobby_id/categories/:category_name/items/:item_id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((hobby_id, category_name, item_id)): Path<(String, String, String)>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> ApiResult<Hobby> {
    let Json(item) = payload?;
    let hobby = state
        .hobbies
        .update_item(&user.owner(), &hobby_id, &category_name, &item_id, item.data)
        .await?;
    Ok(ApiResponse::success(hobby))
}

/// DELETE /api/hobbies/:hobby_id/categories/:category_name/items/:item_id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((hobby_id, category_name, item_id)): Path<(String, String, String)>,
) -> ApiResult<Hobby> {
    let hobby = state
        .hobbies
        .delete_item(&user.owner(), &hobby_id, &category_name, &item_id)
        .await?;
    Ok(ApiResponse::success(hobby))
}
