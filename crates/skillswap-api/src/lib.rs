//! # skillswap-api
//!
//! HTTP layer for SkillSwap built on Axum. Maps requests onto the service
//! layer, turns [`skillswap_core::AppError`] kinds into status codes, and
//! upgrades `/ws` to the push-notification socket.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
