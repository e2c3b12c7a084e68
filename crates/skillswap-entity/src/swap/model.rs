//! Swap request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use skillswap_core::types::{SwapRequestId, UserId};

use super::status::SwapStatus;

/// A directed proposal to exchange one skill for another.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SwapRequest {
    pub id: SwapRequestId,
    /// The user who sent the request.
    pub from_user_id: UserId,
    /// The only user allowed to answer it.
    pub to_user_id: UserId,
    /// Skill the sender wants to learn.
    pub skill_needed: String,
    /// Skill the sender offers in return.
    pub skill_offered: String,
    /// Free-form proposed schedule.
    pub schedule: Option<String>,
    /// Introduction written by the sender.
    pub message: Option<String>,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SwapRequest {
    /// Whether `user_id` is the sender or the recipient.
    pub fn involves(&self, user_id: UserId) -> bool {
        self.from_user_id == user_id || self.to_user_id == user_id
    }
}

/// Data required to create a new swap request.
#[derive(Debug, Clone)]
pub struct CreateSwapRequest {
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub skill_needed: String,
    pub skill_offered: String,
    pub schedule: Option<String>,
    pub message: Option<String>,
}
