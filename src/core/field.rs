//! The playing field: a rectangle of cells, some of which are rock.

use serde::{Deserialize, Serialize};

use super::common::{FieldError, Position};
use super::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Wire form of a field: `{"height":H,"width":W,"rock":[[x,y],...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FieldWire {
    height: i32,
    width: i32,
    rock: Vec<Position>,
}

/// Immutable map of a game.
///
/// `x` ranges over `0..width` and `y` over `0..height`. Cells listed in
/// `rock` can be neither occupied nor attacked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldWire", into = "FieldWire")]
pub struct Field {
    height: i32,
    width: i32,
    rock: Vec<Position>,
    squares: Vec<Position>,
}

impl Field {
    /// Build a field of `height` rows and `width` columns.
    pub fn new(height: i32, width: i32, rock: Vec<Position>) -> Result<Self, FieldError> {
        if height <= 0 || width <= 0 {
            return Err(FieldError::InvalidDimensions { height, width });
        }
        if let Some(&bad) = rock
            .iter()
            .find(|p| !(0..width).contains(&p.0) || !(0..height).contains(&p.1))
        {
            return Err(FieldError::RockOutOfBounds(bad));
        }
        Ok(Self::with_rock(height, width, rock))
    }

    fn with_rock(height: i32, width: i32, rock: Vec<Position>) -> Self {
        let squares = (0..width)
            .flat_map(|x| (0..height).map(move |y| Position(x, y)))
            .filter(|p| !rock.contains(p))
            .collect();
        Self {
            height,
            width,
            rock,
            squares,
        }
    }

    /// A field whose four corners are rock.
    pub fn rounded(height: i32, width: i32) -> Result<Self, FieldError> {
        let mut rock = Vec::new();
        for x in [0, width - 1] {
            for y in [0, height - 1] {
                let p = Position(x, y);
                if !rock.contains(&p) {
                    rock.push(p);
                }
            }
        }
        Self::new(height, width, rock)
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn rock(&self) -> &[Position] {
        &self.rock
    }

    /// Every passable cell, `x`-major then `y`-minor.
    pub fn squares(&self) -> &[Position] {
        &self.squares
    }

    /// Whether a ship may be placed on, moved to or attacked at `position`.
    pub fn passable(&self, position: Position) -> bool {
        (0..self.width).contains(&position.0)
            && (0..self.height).contains(&position.1)
            && !self.rock.contains(&position)
    }

    /// One line per row, `_` for passable cells and `*` for rock.
    pub fn to_ascii(&self) -> String {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.passable(Position(x, y)) { '_' } else { '*' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> String {
        // A field always serializes: it holds only integers.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(msg: &str) -> Result<Self, FieldError> {
        let wire: FieldWire =
            serde_json::from_str(msg).map_err(|e| FieldError::Malformed(e.to_string()))?;
        Self::try_from(wire)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::with_rock(DEFAULT_HEIGHT, DEFAULT_WIDTH, Vec::new())
    }
}

impl TryFrom<FieldWire> for Field {
    type Error = FieldError;

    fn try_from(wire: FieldWire) -> Result<Self, Self::Error> {
        Field::new(wire.height, wire.width, wire.rock)
    }
}

impl From<Field> for FieldWire {
    fn from(field: Field) -> Self {
        FieldWire {
            height: field.height,
            width: field.width,
            rock: field.rock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_field_is_five_by_five() {
        let field = Field::default();
        assert!(field.passable(Position(0, 0)));
        assert!(!field.passable(Position(5, 5)));
        assert!(!field.passable(Position(-1, 0)));
        assert_eq!(field.squares().len(), 25);
    }

    #[test]
    fn width_and_height() {
        let field = Field::new(2, 3, vec![]).unwrap();
        assert_eq!(field.width(), 3);
        assert_eq!(field.height(), 2);
        assert!(field.passable(Position(2, 1)));
        assert!(!field.passable(Position(1, 2)));
    }

    #[test]
    fn squares_are_x_major() {
        let field = Field::new(2, 3, vec![]).unwrap();
        let expected: Vec<Position> = [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
            .into_iter()
            .map(Position::from)
            .collect();
        assert_eq!(field.squares(), expected.as_slice());
    }

    #[test]
    fn rock_is_impassable() {
        let field = Field::new(3, 2, vec![Position(0, 0)]).unwrap();
        assert!(!field.passable(Position(0, 0)));
        assert!(!field.squares().contains(&Position(0, 0)));
        assert_eq!(field.squares().len(), 5);
    }

    #[test]
    fn ascii_view() {
        assert_eq!(Field::new(2, 3, vec![]).unwrap().to_ascii(), "___\n___");
        assert_eq!(
            Field::new(3, 2, vec![Position(0, 0)]).unwrap().to_ascii(),
            "*_\n__\n__"
        );
    }

    #[test]
    fn rounded_field_has_rock_corners() {
        let field = Field::rounded(5, 4).unwrap();
        for corner in [(0, 0), (0, 4), (3, 0), (3, 4)] {
            assert!(!field.passable(Position::from(corner)));
        }
        assert_eq!(field.rock().len(), 4);
        assert!(field.passable(Position(1, 0)));
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(
            Field::new(0, 3, vec![]),
            Err(FieldError::InvalidDimensions { .. })
        ));
        assert_eq!(
            Field::new(3, 3, vec![Position(3, 0)]),
            Err(FieldError::RockOutOfBounds(Position(3, 0)))
        );
        assert!(matches!(
            Field::from_json(r#"{"height":3,"width":3,"rock":[1,2]}"#),
            Err(FieldError::Malformed(_))
        ));
        assert!(matches!(
            Field::from_json(r#"{"height":3,"width":3,"rock":[[1,2,3]]}"#),
            Err(FieldError::Malformed(_))
        ));
    }

    #[test]
    fn json_wire_form() {
        let field = Field::new(3, 4, vec![Position(0, 0), Position(3, 2)]).unwrap();
        assert_eq!(
            field.to_json(),
            r#"{"height":3,"width":4,"rock":[[0,0],[3,2]]}"#
        );
        assert_eq!(Field::from_json(&field.to_json()).unwrap(), field);
    }
}
