//! Identity of the caller, threaded through every service operation.

use serde::{Deserialize, Serialize};

use skillswap_core::error::AppError;
use skillswap_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from a verified token and trusted as-is by the
/// services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl RequestContext {
    pub fn new(user_id: UserId, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    /// Fail with `Authorization` unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::authorization("Admin access required"))
        }
    }
}
