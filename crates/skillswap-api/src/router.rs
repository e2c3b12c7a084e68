//! Route definitions.

use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    let v1 = Router::new()
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(swap_routes())
        .merge(admin_routes());

    let api = Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/v1", v1);

    Router::new()
        .nest("/api", api)
        .route("/ws", get(handlers::ws::ws_handler))
        .layer(from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/user/signup", post(handlers::auth::user_signup))
        .route("/user/login", post(handlers::auth::user_login))
        .route("/admin/signup", post(handlers::auth::admin_signup))
        .route("/admin/login", post(handlers::auth::admin_login))
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handlers::profile::get_own).put(handlers::profile::upsert_own),
        )
        .route("/profiles", get(handlers::profile::browse))
        .route("/profiles/{user_id}", get(handlers::profile::get_by_user))
}

fn swap_routes() -> Router<AppState> {
    Router::new()
        .route("/swaps", post(handlers::swap::create))
        .route("/swaps/sent", get(handlers::swap::list_sent))
        .route("/swaps/received", get(handlers::swap::list_received))
        .route("/swaps/{id}", get(handlers::swap::get))
        .route("/swaps/{id}/respond", put(handlers::swap::respond))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::list_users))
        .route("/admin/users/{id}/status", put(handlers::admin::set_user_status))
        .route("/admin/swaps", get(handlers::admin::list_swaps))
}
