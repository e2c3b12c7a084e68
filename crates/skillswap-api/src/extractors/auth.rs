//! Authentication extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use skillswap_core::error::AppError;
use skillswap_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from the `Authorization: Bearer` header.
///
/// The token subject is re-checked against the user store so a ban takes
/// effect before the token expires.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid authorization format"))?;

        let ctx = authenticate_token(state, token).await?;
        Ok(AuthUser(ctx))
    }
}

/// Caller that must hold the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub RequestContext);

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(ctx) = AuthUser::from_request_parts(parts, state).await?;
        ctx.require_admin()?;
        Ok(AdminUser(ctx))
    }
}

/// Decode `token` and load the current account state behind it.
///
/// Shared by the bearer extractor and the WebSocket upgrade.
pub async fn authenticate_token(state: &AppState, token: &str) -> Result<RequestContext, AppError> {
    let claims = state.jwt_decoder.decode(token)?;
    let user = state.accounts.ensure_active(claims.user_id()).await?;
    Ok(RequestContext::new(user.id, user.is_admin))
}
