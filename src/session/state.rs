//! Session activity state.

use serde::Serialize;
use std::fmt;

/// Whether the session is free to accept work.
///
/// `Busy` covers both document ingestion and an in-flight chat request.
/// There is no cancelled state: once started, an operation runs to the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Waiting for input.
    #[default]
    Idle,
    /// Processing an upload or waiting for a reply.
    Busy,
}

impl SessionState {
    /// Returns `true` while an operation is running.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Busy)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Busy => f.write_str("busy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
        assert!(!SessionState::Idle.is_busy());
        assert!(SessionState::Busy.is_busy());
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::Busy.to_string(), "busy");
    }
}
