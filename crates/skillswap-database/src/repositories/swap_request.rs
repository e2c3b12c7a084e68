//! Swap request repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use skillswap_core::error::{AppError, ErrorKind};
use skillswap_core::result::AppResult;
use skillswap_core::types::{SwapRequestId, UserId};
use skillswap_entity::swap::{CreateSwapRequest, SwapRequest, SwapStatus};

use crate::store::SwapRequestStore;

/// PostgreSQL store for the `swap_requests` table.
#[derive(Debug, Clone)]
pub struct SwapRequestRepository {
    pool: PgPool,
}

impl SwapRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwapRequestStore for SwapRequestRepository {
    async fn create(&self, data: &CreateSwapRequest) -> AppResult<SwapRequest> {
        sqlx::query_as::<_, SwapRequest>(
            "INSERT INTO swap_requests \
                (from_user_id, to_user_id, skill_needed, skill_offered, schedule, message) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(data.from_user_id)
        .bind(data.to_user_id)
        .bind(&data.skill_needed)
        .bind(&data.skill_offered)
        .bind(&data.schedule)
        .bind(&data.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("swap_requests_distinct_users") =>
            {
                AppError::validation("Cannot send a swap request to yourself")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create swap request", e),
        })
    }

    async fn find_by_id(&self, id: SwapRequestId) -> AppResult<Option<SwapRequest>> {
        sqlx::query_as::<_, SwapRequest>("SELECT * FROM swap_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find swap request", e)
            })
    }

    async fn update_status_if_pending(
        &self,
        id: SwapRequestId,
        status: SwapStatus,
    ) -> AppResult<Option<SwapRequest>> {
        // Row-level lock taken by UPDATE serializes concurrent answers; the
        // loser re-evaluates the predicate and matches nothing.
        sqlx::query_as::<_, SwapRequest>(
            "UPDATE swap_requests SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update swap request status", e)
        })
    }

    async fn list_sent(&self, user_id: UserId) -> AppResult<Vec<SwapRequest>> {
        sqlx::query_as::<_, SwapRequest>(
            "SELECT * FROM swap_requests WHERE from_user_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sent requests", e))
    }

    async fn list_received(&self, user_id: UserId) -> AppResult<Vec<SwapRequest>> {
        sqlx::query_as::<_, SwapRequest>(
            "SELECT * FROM swap_requests WHERE to_user_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list received requests", e)
        })
    }

    async fn list_all(&self) -> AppResult<Vec<SwapRequest>> {
        sqlx::query_as::<_, SwapRequest>(
            "SELECT * FROM swap_requests ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list swap requests", e))
    }
}
