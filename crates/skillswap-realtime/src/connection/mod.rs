//! Live channels to connected clients.

pub mod channel;
pub mod handle;

pub use channel::{ConnectionId, PushChannel};
pub use handle::ConnectionHandle;
