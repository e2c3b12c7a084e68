//! Fixtures shared by the service unit tests.

use skillswap_core::config::RealtimeConfig;
use skillswap_database::Stores;
use skillswap_entity::user::{CreateUser, User};
use skillswap_realtime::RealtimeEngine;

use crate::context::RequestContext;

pub(crate) struct Fixture {
    pub stores: Stores,
    pub realtime: RealtimeEngine,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            stores: Stores::memory(),
            realtime: RealtimeEngine::new(RealtimeConfig::default()),
        }
    }

    /// Insert a user directly, skipping password hashing.
    pub async fn user(&self, name: &str, is_admin: bool) -> User {
        self.stores
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: "unused".to_string(),
                is_admin,
            })
            .await
            .unwrap()
    }
}

pub(crate) fn ctx(user: &User) -> RequestContext {
    RequestContext::new(user.id, user.is_admin)
}

/// Parse every frame currently queued on a connection.
pub(crate) fn drain(rx: &mut tokio::sync::mpsc::Receiver<String>) -> Vec<serde_json::Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).unwrap());
    }
    frames
}
