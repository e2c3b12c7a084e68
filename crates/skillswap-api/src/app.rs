//! Application builder.

use axum::Router;

use crate::router::build_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
