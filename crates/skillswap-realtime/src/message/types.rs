//! Outbound WebSocket message definitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skillswap_core::types::UserId;

/// Category tag carried in every notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// Someone sent the user a swap request.
    SwapRequest,
    /// The recipient answered one of the user's requests.
    SwapResponse,
    Mention,
    Answer,
    Comment,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SwapRequest => "swap-request",
            Self::SwapResponse => "swap-response",
            Self::Mention => "mention",
            Self::Answer => "answer",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notification addressed to one user. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    /// Recipient; routing only, not part of the wire body.
    #[serde(skip_serializing)]
    pub user_id: UserId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub timestamp: DateTime<Utc>,
}

impl NotificationPayload {
    /// Build a payload stamped with the current time.
    pub fn new(user_id: UserId, message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            user_id,
            message: message.into(),
            kind,
            timestamp: Utc::now(),
        }
    }
}

/// Frames sent by the server to the client.
///
/// Serialized as `{"type": "<variant>", "data": {...}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum OutboundMessage {
    Notification(NotificationPayload),
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
