//! Skill profiles.

pub mod service;

pub use service::{ProfileFilter, ProfileInput, ProfileService};
