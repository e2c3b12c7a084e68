//! Swap request lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a swap request.
///
/// `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "swap_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Declined,
}

impl SwapStatus {
    /// Whether the request can still be answered.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The recipient's answer to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapDecision {
    Accepted,
    Declined,
}

impl SwapDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

impl From<SwapDecision> for SwapStatus {
    fn from(decision: SwapDecision) -> Self {
        match decision {
            SwapDecision::Accepted => Self::Accepted,
            SwapDecision::Declined => Self::Declined,
        }
    }
}

impl fmt::Display for SwapDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_maps_to_terminal_status() {
        assert_eq!(SwapStatus::from(SwapDecision::Accepted), SwapStatus::Accepted);
        assert_eq!(SwapStatus::from(SwapDecision::Declined), SwapStatus::Declined);
        assert!(!SwapStatus::from(SwapDecision::Accepted).is_pending());
    }

    #[test]
    fn decision_wire_form_is_the_terminal_status_name() {
        let decision: SwapDecision = serde_json::from_str("\"declined\"").unwrap();
        assert_eq!(decision, SwapDecision::Declined);
        assert!(serde_json::from_str::<SwapDecision>("\"decline\"").is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SwapStatus::Pending).unwrap(), "\"pending\"");
    }
}
