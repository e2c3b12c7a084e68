//! Builds notification payloads and routes them to live connections.

use std::sync::Arc;

use tracing::debug;

use skillswap_core::types::UserId;

use crate::message::{NotificationKind, NotificationPayload};
use crate::registry::{ConnectionRegistry, Delivery};

/// Best-effort notifier.
///
/// A missing or closed connection is indistinguishable from success for
/// the caller. Nothing is queued for offline users.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    registry: Arc<ConnectionRegistry>,
}

impl NotificationDispatcher {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Notify `user_id` now. Never fails and never waits on the client.
    pub fn notify(&self, user_id: UserId, message: impl Into<String>, kind: NotificationKind) {
        let payload = NotificationPayload::new(user_id, message, kind);
        let outcome = self.registry.deliver(user_id, &payload);
        if outcome == Delivery::Delivered {
            debug!(user_id = %user_id, kind = %kind, "Notification delivered");
        } else {
            debug!(user_id = %user_id, kind = %kind, ?outcome, "Notification not delivered");
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::connection::ConnectionHandle;

    #[test]
    fn notify_delivers_stamped_frame_to_live_user() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (tx, mut rx) = mpsc::channel(4);
        registry.register(UserId(2), Arc::new(ConnectionHandle::new(UserId(2), tx)));

        let before = chrono::Utc::now();
        NotificationDispatcher::new(registry).notify(
            UserId(2),
            "request accepted by 2",
            NotificationKind::SwapResponse,
        );

        let value: serde_json::Value = serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
        assert_eq!(value["data"]["type"], "swap-response");
        let ts = chrono::DateTime::parse_from_rfc3339(value["data"]["timestamp"].as_str().unwrap())
            .unwrap();
        assert!(ts >= before);
    }

    #[test]
    fn notify_offline_user_is_silent() {
        let registry = Arc::new(ConnectionRegistry::new());
        NotificationDispatcher::new(registry.clone()).notify(
            UserId(5),
            "new request from 1",
            NotificationKind::SwapRequest,
        );
        assert_eq!(registry.connection_count(), 0);
    }
}
