//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use skillswap_auth::JwtDecoder;
use skillswap_core::config::AppConfig;
use skillswap_database::Stores;
use skillswap_realtime::RealtimeEngine;
use skillswap_service::{AccountService, AdminService, ProfileService, SwapRequestService};

/// Passed to every Axum handler via `State<AppState>`.
///
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt_decoder: Arc<JwtDecoder>,
    pub realtime: RealtimeEngine,
    pub accounts: Arc<AccountService>,
    pub profiles: Arc<ProfileService>,
    pub swaps: Arc<SwapRequestService>,
    pub admin: Arc<AdminService>,
    pub started_at: Instant,
}

impl AppState {
    /// Wire every service over `stores`.
    pub fn new(config: AppConfig, stores: Stores, realtime: RealtimeEngine) -> Self {
        let accounts = AccountService::new(stores.users.clone(), &config.auth);
        let profiles = ProfileService::new(stores.users.clone(), stores.profiles.clone());
        let swaps = SwapRequestService::new(
            stores.users.clone(),
            stores.swaps.clone(),
            realtime.notifications.clone(),
        );
        let admin = AdminService::new(stores.users, stores.swaps, realtime.registry.clone());

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            realtime,
            accounts: Arc::new(accounts),
            profiles: Arc::new(profiles),
            swaps: Arc::new(swaps),
            admin: Arc::new(admin),
            started_at: Instant::now(),
        }
    }
}
