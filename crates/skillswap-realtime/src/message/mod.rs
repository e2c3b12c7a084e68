//! Wire messages pushed to clients.

pub mod types;

pub use types::{NotificationKind, NotificationPayload, OutboundMessage};
