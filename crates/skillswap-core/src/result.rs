//! Convenience result type alias for SkillSwap.

use crate::error::AppError;

/// A specialized `Result` type for SkillSwap operations.
pub type AppResult<T> = Result<T, AppError>;
