//! Swap requests between two users.

pub mod model;
pub mod status;

pub use model::{CreateSwapRequest, SwapRequest};
pub use status::{SwapDecision, SwapStatus};
