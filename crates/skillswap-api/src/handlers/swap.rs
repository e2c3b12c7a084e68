//! Swap request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use skillswap_entity::swap::SwapRequest;

use crate::dto::request::{CreateSwapRequestBody, RespondRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, SwapRequestIdPath, ValidatedJson};
use crate::state::AppState;

/// POST /api/v1/swaps
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateSwapRequestBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SwapRequest>>)> {
    let request = state.swaps.create(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// PUT /api/v1/swaps/{id}/respond
pub async fn respond(
    State(state): State<AppState>,
    auth: AuthUser,
    SwapRequestIdPath(id): SwapRequestIdPath,
    ValidatedJson(body): ValidatedJson<RespondRequest>,
) -> ApiResult<Json<ApiResponse<SwapRequest>>> {
    let request = state.swaps.respond(&auth, id, body.status).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// GET /api/v1/swaps/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    SwapRequestIdPath(id): SwapRequestIdPath,
) -> ApiResult<Json<ApiResponse<SwapRequest>>> {
    let request = state.swaps.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// GET /api/v1/swaps/sent
pub async fn list_sent(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<SwapRequest>>>> {
    let requests = state.swaps.list_sent(&auth).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/v1/swaps/received
pub async fn list_received(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<SwapRequest>>>> {
    let requests = state.swaps.list_received(&auth).await?;
    Ok(Json(ApiResponse::ok(requests)))
}
