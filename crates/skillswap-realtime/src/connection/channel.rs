//! The transport boundary seen by the registry.

use std::fmt;

use uuid::Uuid;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// What the registry needs from an open client channel.
pub trait PushChannel: Send + Sync + fmt::Debug {
    /// Identifier distinguishing successive connections of the same user.
    fn id(&self) -> ConnectionId;

    /// Whether frames can still be written.
    fn is_open(&self) -> bool;

    /// Queue one serialized frame. Returns `false` if it was not accepted.
    ///
    /// Must not block.
    fn send(&self, frame: String) -> bool;

    /// Ask the transport to close the channel.
    fn close(&self);
}
