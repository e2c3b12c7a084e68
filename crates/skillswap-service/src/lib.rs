//! # skillswap-service
//!
//! Business logic for SkillSwap. Every operation that acts on behalf of a
//! caller takes an explicit [`RequestContext`]; services never read
//! identity from ambient state.
//!
//! Services follow constructor injection: store trait objects, the
//! notification dispatcher and the auth primitives are handed in as `Arc`s.

pub mod account;
pub mod admin;
pub mod context;
pub mod profile;
pub mod swap;

mod text;

pub use account::{AccountService, AuthOutcome, SignupInput};
pub use admin::AdminService;
pub use context::RequestContext;
pub use profile::{ProfileFilter, ProfileInput, ProfileService};
pub use swap::{NewSwapRequest, SwapRequestService};

#[cfg(test)]
pub(crate) mod testing;
