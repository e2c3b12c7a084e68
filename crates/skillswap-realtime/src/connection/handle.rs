//! Channel handle backed by a bounded queue drained by the socket task.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use uuid::Uuid;

use skillswap_core::types::UserId;

use super::channel::{ConnectionId, PushChannel};

/// A handle to a single WebSocket connection.
///
/// The socket task owns the receiving end of `sender` and forwards frames
/// to the client until the handle is closed.
#[derive(Debug)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    pub user_id: UserId,
    sender: mpsc::Sender<String>,
    alive: AtomicBool,
    closed: CancellationToken,
}

impl ConnectionHandle {
    pub fn new(user_id: UserId, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            sender,
            alive: AtomicBool::new(true),
            closed: CancellationToken::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Resolves once [`PushChannel::close`] has been called.
    pub async fn closed(&self) {
        self.closed.cancelled().await
    }
}

impl PushChannel for ConnectionHandle {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn is_open(&self) -> bool {
        self.is_alive() && !self.sender.is_closed()
    }

    fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(connection_id = %self.id, "Send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    fn close(&self) {
        self.mark_dead();
        self.closed.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_receiver_marks_handle_dead_on_send() {
        let (tx, rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new(UserId(1), tx);
        assert!(handle.is_open());

        drop(rx);
        assert!(!handle.is_open());
        assert!(!handle.send("x".into()));
        assert!(!handle.is_alive());
    }

    #[test]
    fn full_queue_drops_without_killing_the_handle() {
        let (tx, _rx) = mpsc::channel(1);
        let handle = ConnectionHandle::new(UserId(1), tx);

        assert!(handle.send("first".into()));
        assert!(!handle.send("second".into()));
        assert!(handle.is_alive());
    }

    #[tokio::test]
    async fn close_wakes_the_socket_task() {
        let (tx, _rx) = mpsc::channel(1);
        let handle = ConnectionHandle::new(UserId(1), tx);

        handle.close();
        handle.closed().await;
        assert!(!handle.is_open());
    }
}
