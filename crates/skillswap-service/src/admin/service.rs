//! Admin-only user moderation and oversight.

use std::sync::Arc;

use tracing::info;

use skillswap_core::error::AppError;
use skillswap_core::types::UserId;
use skillswap_database::{SwapRequestStore, UserStore};
use skillswap_entity::swap::SwapRequest;
use skillswap_entity::user::User;
use skillswap_realtime::ConnectionRegistry;

use crate::context::RequestContext;

/// Every operation requires an admin caller.
#[derive(Clone)]
pub struct AdminService {
    users: Arc<dyn UserStore>,
    swaps: Arc<dyn SwapRequestStore>,
    registry: Arc<ConnectionRegistry>,
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService").finish_non_exhaustive()
    }
}

impl AdminService {
    pub fn new(
        users: Arc<dyn UserStore>,
        swaps: Arc<dyn SwapRequestStore>,
        registry: Arc<ConnectionRegistry>,
    ) -> Self {
        Self {
            users,
            swaps,
            registry,
        }
    }

    pub async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        ctx.require_admin()?;
        self.users.list().await
    }

    /// Ban or unban a user. A ban also drops the user's live connection.
    pub async fn set_user_active(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        active: bool,
    ) -> Result<User, AppError> {
        ctx.require_admin()?;
        if user_id == ctx.user_id && !active {
            return Err(AppError::validation("Admins cannot deactivate themselves"));
        }

        let user = self
            .users
            .set_active(user_id, active)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        if !active {
            self.registry.evict(user_id);
        }

        info!(admin_id = %ctx.user_id, user_id = %user_id, active, "User status changed");
        Ok(user)
    }

    /// Every swap request, newest first.
    pub async fn list_swap_requests(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<SwapRequest>, AppError> {
        ctx.require_admin()?;
        self.swaps.list_all().await
    }
}
