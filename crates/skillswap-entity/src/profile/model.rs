//! Profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use skillswap_core::types::UserId;

/// How reachable a user currently is for swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "availability", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Busy,
    Offline,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Offline => "offline",
        };
        write!(f, "{s}")
    }
}

/// A user's skill profile. At most one per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: UserId,
    pub location: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: Availability,
    /// Hidden from browsing when false.
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Case-insensitive substring match against offered and wanted skills.
    pub fn mentions_skill(&self, needle: &str) -> bool {
        skills_mention(&self.skills_offered, &self.skills_wanted, needle)
    }
}

fn skills_mention(offered: &[String], wanted: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    offered
        .iter()
        .chain(wanted.iter())
        .any(|skill| skill.to_lowercase().contains(&needle))
}

/// A public profile joined with its owner's display name, as shown when
/// browsing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileListing {
    pub user_id: UserId,
    pub name: String,
    pub location: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: Availability,
}

impl ProfileListing {
    /// Case-insensitive substring match against offered and wanted skills.
    pub fn mentions_skill(&self, needle: &str) -> bool {
        skills_mention(&self.skills_offered, &self.skills_wanted, needle)
    }
}

/// Data used to create or replace a profile.
#[derive(Debug, Clone)]
pub struct UpsertProfile {
    pub user_id: UserId,
    pub location: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: Availability,
    pub is_public: bool,
}
