//! Signup and login for members and admins.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use skillswap_entity::user::AccountRole;

use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::{ApiResponse, AuthResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

type AuthReply = ApiResult<(StatusCode, Json<ApiResponse<AuthResponse>>)>;

async fn signup(state: &AppState, req: SignupRequest, role: AccountRole) -> AuthReply {
    let outcome = state.accounts.signup(req.into(), role).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AuthResponse::from(outcome))),
    ))
}

async fn login(state: &AppState, req: LoginRequest, role: AccountRole) -> AuthReply {
    let outcome = state.accounts.login(&req.email, &req.password, role).await?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(AuthResponse::from(outcome)))))
}

/// POST /api/v1/user/signup
pub async fn user_signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> AuthReply {
    signup(&state, req, AccountRole::Member).await
}

/// POST /api/v1/user/login
pub async fn user_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AuthReply {
    login(&state, req, AccountRole::Member).await
}

/// POST /api/v1/admin/signup
pub async fn admin_signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> AuthReply {
    signup(&state, req, AccountRole::Admin).await
}

/// POST /api/v1/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AuthReply {
    login(&state, req, AccountRole::Admin).await
}
