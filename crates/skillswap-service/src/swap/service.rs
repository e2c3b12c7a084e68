//! Swap request creation, answers, and listings.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use skillswap_core::error::AppError;
use skillswap_core::types::{SwapRequestId, UserId};
use skillswap_database::{SwapRequestStore, UserStore};
use skillswap_entity::swap::{CreateSwapRequest, SwapDecision, SwapRequest};
use skillswap_realtime::{NotificationDispatcher, NotificationKind};

use crate::context::RequestContext;
use crate::text;

/// Fields of a new request, as supplied by the sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSwapRequest {
    pub to_user_id: UserId,
    pub skill_needed: String,
    pub skill_offered: String,
    pub schedule: Option<String>,
    pub message: Option<String>,
}

/// Enforces the request lifecycle and notifies the counterpart.
///
/// Every transition is written to the store first; the notification is
/// attempted only after the write succeeded and its outcome is ignored.
#[derive(Clone)]
pub struct SwapRequestService {
    users: Arc<dyn UserStore>,
    swaps: Arc<dyn SwapRequestStore>,
    notifications: Arc<NotificationDispatcher>,
}

impl std::fmt::Debug for SwapRequestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapRequestService").finish_non_exhaustive()
    }
}

impl SwapRequestService {
    pub fn new(
        users: Arc<dyn UserStore>,
        swaps: Arc<dyn SwapRequestStore>,
        notifications: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            users,
            swaps,
            notifications,
        }
    }

    /// Send a request from the caller to `input.to_user_id`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NewSwapRequest,
    ) -> Result<SwapRequest, AppError> {
        if input.to_user_id == ctx.user_id {
            return Err(AppError::validation(
                "Cannot send a swap request to yourself",
            ));
        }
        let skill_needed = text::required(&input.skill_needed, "skill_needed")?;
        let skill_offered = text::required(&input.skill_offered, "skill_offered")?;

        let target = self
            .users
            .find_by_id(input.to_user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", input.to_user_id)))?;

        let request = self
            .swaps
            .create(&CreateSwapRequest {
                from_user_id: ctx.user_id,
                to_user_id: target.id,
                skill_needed,
                skill_offered,
                schedule: text::optional(input.schedule.as_deref()),
                message: text::optional(input.message.as_deref()),
            })
            .await?;

        info!(
            request_id = %request.id,
            from = %request.from_user_id,
            to = %request.to_user_id,
            "Swap request created"
        );

        self.notifications.notify(
            request.to_user_id,
            format!("new request from {}", request.from_user_id),
            NotificationKind::SwapRequest,
        );

        Ok(request)
    }

    /// Answer a pending request addressed to the caller.
    ///
    /// Fails with `NotFound` if the request does not exist,
    /// `Authorization` if the caller is not its recipient, and `Conflict`
    /// if it has already been answered (including by a concurrent call).
    pub async fn respond(
        &self,
        ctx: &RequestContext,
        request_id: SwapRequestId,
        decision: SwapDecision,
    ) -> Result<SwapRequest, AppError> {
        let request = self
            .swaps
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Swap request {request_id} not found")))?;

        if request.to_user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Only the recipient can respond to this swap request",
            ));
        }
        if !request.status.is_pending() {
            return Err(already_answered(request_id));
        }

        let updated = self
            .swaps
            .update_status_if_pending(request_id, decision.into())
            .await?
            .ok_or_else(|| already_answered(request_id))?;

        info!(
            request_id = %updated.id,
            status = %updated.status,
            responder = %ctx.user_id,
            "Swap request answered"
        );

        self.notifications.notify(
            updated.from_user_id,
            format!("request {decision} by {}", ctx.user_id),
            NotificationKind::SwapResponse,
        );

        Ok(updated)
    }

    /// A single request, visible to its two parties and to admins.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        request_id: SwapRequestId,
    ) -> Result<SwapRequest, AppError> {
        self.swaps
            .find_by_id(request_id)
            .await?
            .filter(|request| ctx.is_admin || request.involves(ctx.user_id))
            .ok_or_else(|| AppError::not_found(format!("Swap request {request_id} not found")))
    }

    /// Requests the caller sent, newest first.
    pub async fn list_sent(&self, ctx: &RequestContext) -> Result<Vec<SwapRequest>, AppError> {
        self.swaps.list_sent(ctx.user_id).await
    }

    /// Requests addressed to the caller, newest first.
    pub async fn list_received(&self, ctx: &RequestContext) -> Result<Vec<SwapRequest>, AppError> {
        self.swaps.list_received(ctx.user_id).await
    }
}

fn already_answered(request_id: SwapRequestId) -> AppError {
    AppError::conflict(format!(
        "Swap request {request_id} has already been answered"
    ))
}
