//! Profile handlers.

use axum::Json;
use axum::extract::{Query, State};

use skillswap_entity::profile::{Profile, ProfileListing};
use skillswap_service::ProfileFilter;

use crate::dto::request::{BrowseQuery, ProfileRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, UserIdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_own(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    let profile = state.profiles.get_own(&auth).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /api/v1/profile
pub async fn upsert_own(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ProfileRequest>,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    let profile = state.profiles.upsert_own(&auth, req.into()).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /api/v1/profiles?skill=&availability=
pub async fn browse(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<BrowseQuery>,
) -> ApiResult<Json<ApiResponse<Vec<ProfileListing>>>> {
    let listings = state.profiles.browse(&ProfileFilter::from(query)).await?;
    Ok(Json(ApiResponse::ok(listings)))
}

/// GET /api/v1/profiles/{user_id}
pub async fn get_by_user(
    State(state): State<AppState>,
    auth: AuthUser,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    let profile = state.profiles.get(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}
