//! Store contracts consumed by the service layer.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`]
//! and an in-memory implementation in [`crate::memory`]. Listing methods
//! return rows newest first, ties broken by identifier descending.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use skillswap_core::result::AppResult;
use skillswap_core::types::{SwapRequestId, UserId};
use skillswap_entity::profile::{Profile, ProfileListing, UpsertProfile};
use skillswap_entity::swap::{CreateSwapRequest, SwapRequest, SwapStatus};
use skillswap_entity::user::{CreateUser, User};

use crate::memory::MemoryStore;
use crate::repositories::{ProfileRepository, SwapRequestRepository, UserRepository};

/// Persistence of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a user. Fails with `Conflict` when the email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Every account, newest first.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Set the active flag. `None` when the user does not exist.
    async fn set_active(&self, id: UserId, active: bool) -> AppResult<Option<User>>;
}

/// Persistence of swap requests.
#[async_trait]
pub trait SwapRequestStore: Send + Sync + 'static {
    /// Insert a new request in the `pending` state.
    async fn create(&self, data: &CreateSwapRequest) -> AppResult<SwapRequest>;

    async fn find_by_id(&self, id: SwapRequestId) -> AppResult<Option<SwapRequest>>;

    /// Atomically move a pending request to `status`.
    ///
    /// The status check and the write are a single step. Returns `None`
    /// when no pending request with this id exists at the moment of the
    /// write, so of two concurrent callers at most one gets `Some`.
    async fn update_status_if_pending(
        &self,
        id: SwapRequestId,
        status: SwapStatus,
    ) -> AppResult<Option<SwapRequest>>;

    /// Requests sent by `user_id`.
    async fn list_sent(&self, user_id: UserId) -> AppResult<Vec<SwapRequest>>;

    /// Requests addressed to `user_id`.
    async fn list_received(&self, user_id: UserId) -> AppResult<Vec<SwapRequest>>;

    async fn list_all(&self) -> AppResult<Vec<SwapRequest>>;
}

/// Persistence of skill profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    /// Create or fully replace the profile of `data.user_id`.
    async fn upsert(&self, data: &UpsertProfile) -> AppResult<Profile>;

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Profile>>;

    /// Public profiles whose owner is active, most recently updated first.
    async fn list_public(&self) -> AppResult<Vec<ProfileListing>>;
}

/// The set of stores the services run against.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub swaps: Arc<dyn SwapRequestStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            swaps: Arc::new(SwapRequestRepository::new(pool.clone())),
            profiles: Arc::new(ProfileRepository::new(pool)),
        }
    }

    /// Stores backed by a single fresh [`MemoryStore`].
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            swaps: store.clone(),
            profiles: store,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
