//! # skillswap-entity
//!
//! Domain entity models for SkillSwap. Every struct here is either a table
//! row (deriving `sqlx::FromRow`) or the input used to create one.

pub mod profile;
pub mod swap;
pub mod user;
