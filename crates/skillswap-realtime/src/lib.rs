//! # skillswap-realtime
//!
//! Push notifications over live WebSocket connections:
//!
//! - [`ConnectionRegistry`] tracks at most one live channel per user
//! - [`NotificationDispatcher`] shapes payloads and hands them to the registry
//! - [`RealtimeEngine`] owns both and opens connection handles for the
//!   transport layer
//!
//! Delivery is best-effort. A user without a live channel simply misses the
//! push; the store remains the source of truth.

pub mod connection;
pub mod engine;
pub mod message;
pub mod notification;
pub mod registry;

pub use connection::{ConnectionHandle, ConnectionId, PushChannel};
pub use engine::RealtimeEngine;
pub use message::{NotificationKind, NotificationPayload, OutboundMessage};
pub use notification::NotificationDispatcher;
pub use registry::{ConnectionRegistry, Delivery};
