//! Swap request lifecycle.

pub mod service;

pub use service::{NewSwapRequest, SwapRequestService};
