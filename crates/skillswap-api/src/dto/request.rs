//! Request DTOs.

use serde::Deserialize;
use validator::Validate;

use skillswap_core::types::UserId;
use skillswap_entity::profile::Availability;
use skillswap_entity::swap::SwapDecision;
use skillswap_service::{NewSwapRequest, ProfileFilter, ProfileInput, SignupInput};

/// Signup request body, for both members and admins.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl From<SignupRequest> for SignupInput {
    fn from(req: SignupRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Create swap request body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSwapRequestBody {
    pub to_user_id: UserId,
    #[validate(length(min = 1, max = 100))]
    pub skill_needed: String,
    #[validate(length(min = 1, max = 100))]
    pub skill_offered: String,
    #[validate(length(max = 200))]
    pub schedule: Option<String>,
    #[validate(length(max = 1000))]
    pub message: Option<String>,
}

impl From<CreateSwapRequestBody> for NewSwapRequest {
    fn from(body: CreateSwapRequestBody) -> Self {
        Self {
            to_user_id: body.to_user_id,
            skill_needed: body.skill_needed,
            skill_offered: body.skill_offered,
            schedule: body.schedule,
            message: body.message,
        }
    }
}

/// Answer to a pending swap request: `{"status": "accepted" | "declined"}`.
#[derive(Debug, Deserialize, Validate)]
pub struct RespondRequest {
    pub status: SwapDecision,
}

/// Full replacement of the caller's profile.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(max = 100))]
    pub location: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub skills_offered: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub skills_wanted: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

impl From<ProfileRequest> for ProfileInput {
    fn from(req: ProfileRequest) -> Self {
        Self {
            location: req.location,
            skills_offered: req.skills_offered,
            skills_wanted: req.skills_wanted,
            availability: req.availability,
            is_public: req.is_public,
        }
    }
}

/// Query parameters for browsing public profiles.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub skill: Option<String>,
    pub availability: Option<Availability>,
}

impl From<BrowseQuery> for ProfileFilter {
    fn from(query: BrowseQuery) -> Self {
        Self {
            skill: query.skill.filter(|s| !s.trim().is_empty()),
            availability: query.availability,
        }
    }
}

/// Ban or unban a user.
#[derive(Debug, Deserialize, Validate)]
pub struct UserStatusRequest {
    pub is_active: bool,
}

/// Query parameters accepted by the WebSocket upgrade.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: Option<String>,
}
