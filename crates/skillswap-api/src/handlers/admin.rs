//! Admin moderation handlers.

use axum::Json;
use axum::extract::State;

use skillswap_entity::swap::SwapRequest;

use crate::dto::request::UserStatusRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, UserIdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.admin.list_users(&admin).await?;
    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// PUT /api/v1/admin/users/{id}/status
pub async fn set_user_status(
    State(state): State<AppState>,
    admin: AdminUser,
    UserIdPath(user_id): UserIdPath,
    ValidatedJson(req): ValidatedJson<UserStatusRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .admin
        .set_user_active(&admin, user_id, req.is_active)
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /api/v1/admin/swaps
pub async fn list_swaps(
    State(state): State<AppState>,
    admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<SwapRequest>>>> {
    let requests = state.admin.list_swap_requests(&admin).await?;
    Ok(Json(ApiResponse::ok(requests)))
}
