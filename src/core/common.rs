//! Common types for the submarine game: coordinates and setup errors.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::ship::ShipType;

/// A cell on the field, `(x, y)`. Serialized as a two-element array `[x, y]`.
///
/// Decoding saturates coordinates beyond `i32` instead of failing, so a far
/// away target is still read as a cell outside the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position(pub i32, pub i32);

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x, y) = <(i64, i64)>::deserialize(deserializer)?;
        Ok(Position(saturate(x), saturate(y)))
    }
}

fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position(x, y)
    }

    pub const fn x(&self) -> i32 {
        self.0
    }

    pub const fn y(&self) -> i32 {
        self.1
    }

    /// Offset from `self` to `to`, i.e. `to - self`.
    pub fn offset_to(&self, to: Position) -> Position {
        Position(to.0 - self.0, to.1 - self.1)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

/// Errors raised while building a [`Field`](super::field::Field).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Height and width must both be positive.
    #[error("field dimensions must be positive, got height {height} and width {width}")]
    InvalidDimensions { height: i32, width: i32 },
    /// A rock cell lies outside the field.
    #[error("rock {0} lies outside the field")]
    RockOutOfBounds(Position),
    /// The wire form could not be parsed, e.g. rock is not a list of x,y pairs.
    #[error("expects list of x,y pairs for rock: {0}")]
    Malformed(String),
}

/// Errors raised when an initial ship placement is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Two ships were placed on the same cell.
    #[error("overlapping positions at {0}")]
    Overlapping(Position),
    /// A ship was placed on rock or outside the field.
    #[error("position {1} of {0} out of field")]
    Impassable(ShipType, Position),
    /// No ship was placed at all.
    #[error("placement contains no ships")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_is_a_pair() {
        let p: Position = serde_json::from_str("[3,-1]").unwrap();
        assert_eq!(p, Position(3, -1));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[3,-1]");
        assert!(serde_json::from_str::<Position>("[1]").is_err());
        assert!(serde_json::from_str::<Position>("[1,\"a\"]").is_err());
    }

    #[test]
    fn huge_coordinates_saturate() {
        let p: Position = serde_json::from_str("[99999999999,-99999999999]").unwrap();
        assert_eq!(p, Position(i32::MAX, i32::MIN));
    }
}
