//! Profile editing and browsing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use skillswap_core::error::AppError;
use skillswap_core::types::UserId;
use skillswap_database::{ProfileStore, UserStore};
use skillswap_entity::profile::{Availability, Profile, ProfileListing, UpsertProfile};

use crate::context::RequestContext;
use crate::text;

/// Editable profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    pub location: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: Availability,
    pub is_public: bool,
}

/// Browse filters; unset fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileFilter {
    /// Case-insensitive substring of an offered or wanted skill.
    pub skill: Option<String>,
    pub availability: Option<Availability>,
}

#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl std::fmt::Debug for ProfileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileService").finish_non_exhaustive()
    }
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { users, profiles }
    }

    /// Create or replace the caller's profile.
    pub async fn upsert_own(
        &self,
        ctx: &RequestContext,
        input: ProfileInput,
    ) -> Result<Profile, AppError> {
        let profile = self
            .profiles
            .upsert(&UpsertProfile {
                user_id: ctx.user_id,
                location: text::optional(input.location.as_deref()),
                skills_offered: text::skill_list(&input.skills_offered),
                skills_wanted: text::skill_list(&input.skills_wanted),
                availability: input.availability,
                is_public: input.is_public,
            })
            .await?;

        info!(user_id = %ctx.user_id, "Profile saved");
        Ok(profile)
    }

    pub async fn get_own(&self, ctx: &RequestContext) -> Result<Profile, AppError> {
        self.profiles
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("You have not created a profile yet"))
    }

    /// Another user's profile.
    ///
    /// Private profiles and profiles of banned users are only visible to
    /// their owner and to admins.
    pub async fn get(&self, ctx: &RequestContext, user_id: UserId) -> Result<Profile, AppError> {
        let not_found = || AppError::not_found(format!("Profile for user {user_id} not found"));

        let profile = self
            .profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(not_found)?;
        if ctx.user_id == user_id || ctx.is_admin {
            return Ok(profile);
        }

        let owner_active = self
            .users
            .find_by_id(user_id)
            .await?
            .is_some_and(|user| user.is_active);
        if profile.is_public && owner_active {
            Ok(profile)
        } else {
            Err(not_found())
        }
    }

    /// Public profiles of active users matching `filter`.
    pub async fn browse(&self, filter: &ProfileFilter) -> Result<Vec<ProfileListing>, AppError> {
        let skill = text::optional(filter.skill.as_deref());
        let listings = self.profiles.list_public().await?;

        Ok(listings
            .into_iter()
            .filter(|listing| skill.as_deref().is_none_or(|s| listing.mentions_skill(s)))
            .filter(|listing| filter.availability.is_none_or(|a| listing.availability == a))
            .collect())
    }
}
