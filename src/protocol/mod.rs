//! Line protocol spoken between the server and the players.
//!
//! Every line is either one of the fixed literals in [`Notice`] (plus the
//! greeting) or a JSON document from [`domain`].

pub mod domain;

pub use domain::*;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::core::config::{DRAW, WAITING, YOUR_TURN, YOU_LOSE, YOU_WIN};

/// A line that does not fit the protocol at the point it was received.
///
/// Kept apart from illegal actions, which are game rules and not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("expected {expected:?}, got {got:?}")]
    UnexpectedLine { expected: &'static str, got: String },
    #[error("malformed {what}: {reason}")]
    Malformed { what: &'static str, reason: String },
}

/// Fixed status lines sent by the server around each turn and at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    YourTurn,
    Waiting,
    YouWin,
    YouLose,
    Even,
}

impl Notice {
    pub const fn as_str(self) -> &'static str {
        match self {
            Notice::YourTurn => YOUR_TURN,
            Notice::Waiting => WAITING,
            Notice::YouWin => YOU_WIN,
            Notice::YouLose => YOU_LOSE,
            Notice::Even => DRAW,
        }
    }

    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        match line {
            YOUR_TURN => Ok(Notice::YourTurn),
            WAITING => Ok(Notice::Waiting),
            YOU_WIN => Ok(Notice::YouWin),
            YOU_LOSE => Ok(Notice::YouLose),
            DRAW => Ok(Notice::Even),
            other => Err(ProtocolError::UnexpectedLine {
                expected: "turn or game status",
                got: other.to_string(),
            }),
        }
    }

    /// Final status for notices that end a match.
    pub fn status(self) -> Option<GameStatus> {
        match self {
            Notice::YouWin => Some(GameStatus::Won),
            Notice::YouLose => Some(GameStatus::Lost),
            Notice::Even => Some(GameStatus::Draw),
            Notice::YourTurn | Notice::Waiting => None,
        }
    }
}

/// Current status of a game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
    Draw,
}

/// Serialize a payload as one JSON line (without the newline).
pub fn encode<T: Serialize>(what: &'static str, value: &T) -> Result<String, ProtocolError> {
    serde_json::to_string(value).map_err(|e| ProtocolError::Malformed {
        what,
        reason: e.to_string(),
    })
}

/// Parse one JSON line as the payload expected at this point.
pub fn decode<T: DeserializeOwned>(what: &'static str, line: &str) -> Result<T, ProtocolError> {
    serde_json::from_str(line).map_err(|e| ProtocolError::Malformed {
        what,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_round_trip_through_literals() {
        for notice in [
            Notice::YourTurn,
            Notice::Waiting,
            Notice::YouWin,
            Notice::YouLose,
            Notice::Even,
        ] {
            assert_eq!(Notice::parse(notice.as_str()), Ok(notice));
        }
        assert!(Notice::parse("your  turn").is_err());
    }

    #[test]
    fn terminal_notices_carry_status() {
        assert_eq!(Notice::YouWin.status(), Some(GameStatus::Won));
        assert_eq!(Notice::Even.status(), Some(GameStatus::Draw));
        assert_eq!(Notice::Waiting.status(), None);
    }

    #[test]
    fn decode_reports_what_failed() {
        let err = decode::<Action>("action", "not json").unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed { what: "action", .. }));
    }
}
