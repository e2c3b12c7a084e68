//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use skillswap_core::types::UserId;

use super::role::AccountRole;

/// A registered member or administrator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique, stored lowercase.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    /// Cleared when an admin bans the account.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The account role derived from the admin flag.
    pub fn role(&self) -> AccountRole {
        if self.is_admin {
            AccountRole::Admin
        } else {
            AccountRole::Member
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    pub is_admin: bool,
}
