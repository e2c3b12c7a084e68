//! # skillswap-auth
//!
//! Token and credential primitives: signed JWTs carrying the caller's
//! identity, and Argon2id password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
