//! Top-level real-time engine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;

use skillswap_core::config::RealtimeConfig;
use skillswap_core::types::UserId;

use crate::connection::ConnectionHandle;
use crate::notification::NotificationDispatcher;
use crate::registry::ConnectionRegistry;

/// Owns the connection registry and the dispatcher that writes to it.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    pub registry: Arc<ConnectionRegistry>,
    pub notifications: Arc<NotificationDispatcher>,
    config: RealtimeConfig,
}

impl RealtimeEngine {
    pub fn new(config: RealtimeConfig) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let notifications = Arc::new(NotificationDispatcher::new(registry.clone()));

        info!(
            channel_buffer_size = config.channel_buffer_size,
            "Real-time engine initialized"
        );

        Self {
            registry,
            notifications,
            config,
        }
    }

    /// Create and register a handle for a freshly authenticated socket.
    ///
    /// The caller drains the returned receiver into the socket.
    pub fn connect(&self, user_id: UserId) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size.max(1));
        let handle = Arc::new(ConnectionHandle::new(user_id, tx));
        self.registry.register(user_id, handle.clone());
        (handle, rx)
    }

    /// Forget the handle when its socket closes.
    pub fn disconnect(&self, handle: &ConnectionHandle) {
        handle.mark_dead();
        self.registry.unregister_connection(handle.user_id, handle.id);
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.config.ping_interval_seconds.max(1))
    }

    /// Close every live connection.
    pub fn shutdown(&self) {
        info!(
            connections = self.registry.connection_count(),
            "Shutting down real-time engine"
        );
        self.registry.close_all();
    }
}
