//! Request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod health;
pub mod profile;
pub mod swap;
pub mod ws;
