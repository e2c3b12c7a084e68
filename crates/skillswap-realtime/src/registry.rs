//! User-to-channel registry.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info, warn};

use skillswap_core::types::UserId;

use crate::connection::{ConnectionId, PushChannel};
use crate::message::{NotificationPayload, OutboundMessage};

/// Result of a delivery attempt. Never an error for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The frame was queued on the live channel.
    Delivered,
    /// The user has no registered channel.
    NoConnection,
    /// The registered channel is no longer open; its entry was pruned.
    Closed,
    /// The channel refused the frame (queue full or serialization failure).
    Dropped,
}

/// Tracks at most one live channel per user.
///
/// Registration is last-write-wins: a new channel for a user supersedes
/// the previous one, which is asked to close. All operations act on a
/// single key and are safe to call concurrently.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    channels: DashMap<UserId, Arc<dyn PushChannel>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `channel` as the live channel of `user_id`.
    pub fn register(&self, user_id: UserId, channel: Arc<dyn PushChannel>) {
        let connection_id = channel.id();
        if let Some(previous) = self.channels.insert(user_id, channel) {
            if previous.id() != connection_id {
                debug!(
                    user_id = %user_id,
                    superseded = %previous.id(),
                    connection_id = %connection_id,
                    "Superseding live connection"
                );
                previous.close();
            }
        }
        info!(user_id = %user_id, connection_id = %connection_id, "Connection registered");
    }

    /// Remove whatever channel is registered for `user_id`.
    pub fn unregister(&self, user_id: UserId) -> bool {
        self.channels.remove(&user_id).is_some()
    }

    /// Remove and close the channel of `user_id`, e.g. after a ban.
    pub fn evict(&self, user_id: UserId) -> bool {
        match self.channels.remove(&user_id) {
            Some((_, channel)) => {
                channel.close();
                info!(user_id = %user_id, connection_id = %channel.id(), "Connection evicted");
                true
            }
            None => false,
        }
    }

    /// Remove the entry for `user_id` only if it is still `connection_id`.
    ///
    /// Used on socket close so a superseded connection cannot evict its
    /// replacement.
    pub fn unregister_connection(&self, user_id: UserId, connection_id: ConnectionId) -> bool {
        let removed = self
            .channels
            .remove_if(&user_id, |_, channel| channel.id() == connection_id)
            .is_some();
        if removed {
            info!(user_id = %user_id, connection_id = %connection_id, "Connection unregistered");
        }
        removed
    }

    /// Push `payload` to the live channel of `user_id`, if any.
    pub fn deliver(&self, user_id: UserId, payload: &NotificationPayload) -> Delivery {
        // Clone the Arc so the shard lock is not held while sending.
        let Some(channel) = self.channels.get(&user_id).map(|entry| entry.value().clone()) else {
            debug!(user_id = %user_id, "No live connection, notification skipped");
            return Delivery::NoConnection;
        };

        if !channel.is_open() {
            let stale = channel.id();
            self.channels.remove_if(&user_id, |_, current| current.id() == stale);
            debug!(user_id = %user_id, connection_id = %stale, "Pruned closed connection");
            return Delivery::Closed;
        }

        let frame = match OutboundMessage::Notification(payload.clone()).to_json() {
            Ok(frame) => frame,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to serialize notification");
                return Delivery::Dropped;
            }
        };

        if channel.send(frame) {
            Delivery::Delivered
        } else {
            Delivery::Dropped
        }
    }

    pub fn is_online(&self, user_id: UserId) -> bool {
        self.channels
            .get(&user_id)
            .is_some_and(|entry| entry.value().is_open())
    }

    pub fn connection_count(&self) -> usize {
        self.channels.len()
    }

    /// Close and forget every channel.
    pub fn close_all(&self) {
        let users: Vec<UserId> = self.channels.iter().map(|entry| *entry.key()).collect();
        for user_id in users {
            if let Some((_, channel)) = self.channels.remove(&user_id) {
                channel.close();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::connection::ConnectionHandle;
    use crate::message::NotificationKind;

    fn open(user: i64) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(8);
        (Arc::new(ConnectionHandle::new(UserId(user), tx)), rx)
    }

    fn payload(user: i64) -> NotificationPayload {
        NotificationPayload::new(UserId(user), "hello", NotificationKind::Mention)
    }

    #[test]
    fn deliver_without_connection_is_a_quiet_miss() {
        let registry = ConnectionRegistry::new();
        assert_eq!(registry.deliver(UserId(9), &payload(9)), Delivery::NoConnection);
        assert_eq!(registry.connection_count(), 0);
    }

    #[test]
    fn deliver_writes_one_frame_to_the_registered_channel() {
        let registry = ConnectionRegistry::new();
        let (handle, mut rx) = open(1);
        registry.register(UserId(1), handle);

        assert_eq!(registry.deliver(UserId(1), &payload(1)), Delivery::Delivered);
        let frame = rx.try_recv().unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["type"], "notification");
        assert_eq!(value["data"]["message"], "hello");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn newer_registration_supersedes_and_closes_the_older() {
        let registry = ConnectionRegistry::new();
        let (first, mut first_rx) = open(1);
        let (second, mut second_rx) = open(1);

        registry.register(UserId(1), first.clone());
        registry.register(UserId(1), second.clone());

        assert!(!first.is_alive());
        assert_eq!(registry.connection_count(), 1);
        assert_eq!(registry.deliver(UserId(1), &payload(1)), Delivery::Delivered);
        assert!(second_rx.try_recv().is_ok());
        assert!(first_rx.try_recv().is_err());
    }

    #[test]
    fn stale_close_does_not_evict_replacement() {
        let registry = ConnectionRegistry::new();
        let (first, _first_rx) = open(1);
        let (second, _second_rx) = open(1);
        registry.register(UserId(1), first.clone());
        registry.register(UserId(1), second.clone());

        assert!(!registry.unregister_connection(UserId(1), first.id));
        assert!(registry.is_online(UserId(1)));
        assert!(registry.unregister_connection(UserId(1), second.id));
        assert!(!registry.is_online(UserId(1)));
    }

    #[test]
    fn unregister_is_a_noop_when_absent() {
        let registry = ConnectionRegistry::new();
        assert!(!registry.unregister(UserId(3)));

        let (handle, _rx) = open(3);
        registry.register(UserId(3), handle);
        assert!(registry.unregister(UserId(3)));
        assert_eq!(registry.deliver(UserId(3), &payload(3)), Delivery::NoConnection);
    }

    #[test]
    fn evict_closes_the_channel() {
        let registry = ConnectionRegistry::new();
        let (handle, _rx) = open(6);
        registry.register(UserId(6), handle.clone());

        assert!(registry.evict(UserId(6)));
        assert!(!handle.is_alive());
        assert!(!registry.evict(UserId(6)));
    }

    #[test]
    fn closed_channel_is_pruned_on_delivery() {
        let registry = ConnectionRegistry::new();
        let (handle, rx) = open(4);
        registry.register(UserId(4), handle);
        drop(rx);

        assert_eq!(registry.deliver(UserId(4), &payload(4)), Delivery::Closed);
        assert_eq!(registry.connection_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_register_unregister_deliver_stays_consistent() {
        let registry = Arc::new(ConnectionRegistry::new());
        let mut tasks = Vec::new();
        for i in 0..32_i64 {
            let registry = registry.clone();
            tasks.push(tokio::spawn(async move {
                let user = UserId(i % 4);
                let (tx, _rx) = mpsc::channel(2);
                let handle = Arc::new(ConnectionHandle::new(user, tx));
                registry.register(user, handle.clone());
                let payload = NotificationPayload::new(user, "x", NotificationKind::Comment);
                let _ = registry.deliver(user, &payload);
                registry.unregister_connection(user, handle.id);
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert!(registry.connection_count() <= 4);
    }

    #[test]
    fn close_all_closes_every_channel() {
        let registry = ConnectionRegistry::new();
        let (a, _ra) = open(1);
        let (b, _rb) = open(2);
        registry.register(UserId(1), a.clone());
        registry.register(UserId(2), b.clone());

        registry.close_all();
        assert_eq!(registry.connection_count(), 0);
        assert!(!a.is_alive() && !b.is_alive());
    }
}
