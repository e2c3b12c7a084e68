//! Profile repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use skillswap_core::error::{AppError, ErrorKind};
use skillswap_core::result::AppResult;
use skillswap_core::types::UserId;
use skillswap_entity::profile::{Profile, ProfileListing, UpsertProfile};

use crate::store::ProfileStore;

/// PostgreSQL store for the `profiles` table.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn upsert(&self, data: &UpsertProfile) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles \
                (user_id, location, skills_offered, skills_wanted, availability, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id) DO UPDATE SET \
                location = EXCLUDED.location, \
                skills_offered = EXCLUDED.skills_offered, \
                skills_wanted = EXCLUDED.skills_wanted, \
                availability = EXCLUDED.availability, \
                is_public = EXCLUDED.is_public, \
                updated_at = NOW() \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.location)
        .bind(&data.skills_offered)
        .bind(&data.skills_wanted)
        .bind(data.availability)
        .bind(data.is_public)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save profile", e))
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }

    async fn list_public(&self) -> AppResult<Vec<ProfileListing>> {
        sqlx::query_as::<_, ProfileListing>(
            "SELECT p.user_id, u.name, p.location, p.skills_offered, p.skills_wanted, \
                    p.availability \
             FROM profiles p \
             JOIN users u ON u.id = p.user_id \
             WHERE p.is_public AND u.is_active \
             ORDER BY p.updated_at DESC, p.user_id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list profiles", e))
    }
}
