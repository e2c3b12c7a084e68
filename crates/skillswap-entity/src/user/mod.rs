//! User accounts.

pub mod model;
pub mod role;

pub use model::{CreateUser, User};
pub use role::AccountRole;
