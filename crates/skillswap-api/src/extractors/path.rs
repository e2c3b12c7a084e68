//! Identifier path segments.
//!
//! A segment that is not a positive integer names no resource, so it is
//! rejected as `NOT_FOUND` rather than as a bad request.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use skillswap_core::error::AppError;
use skillswap_core::types::{SwapRequestId, UserId};

use crate::error::ApiError;

/// `{id}` segment naming a swap request.
#[derive(Debug, Clone, Copy)]
pub struct SwapRequestIdPath(pub SwapRequestId);

/// `{id}` or `{user_id}` segment naming a user.
#[derive(Debug, Clone, Copy)]
pub struct UserIdPath(pub UserId);

async fn raw_segment<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<String, AppError> {
    Path::<String>::from_request_parts(parts, state)
        .await
        .map(|Path(raw)| raw)
        .map_err(|_| AppError::not_found("Resource not found"))
}

impl<S: Send + Sync> FromRequestParts<S> for SwapRequestIdPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_segment(parts, state).await?;
        SwapRequestId::parse_positive(&raw)
            .map(SwapRequestIdPath)
            .ok_or_else(|| AppError::not_found(format!("Swap request {raw} not found")).into())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for UserIdPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_segment(parts, state).await?;
        UserId::parse_positive(&raw)
            .map(UserIdPath)
            .ok_or_else(|| AppError::not_found(format!("User {raw} not found")).into())
    }
}
