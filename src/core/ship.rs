//! Ship types and the per-ship state tracked by the server.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::Position;

/// Kind of ship. Serialized as its one-letter wire name.
///
/// Ordering follows declaration order (`w`, `c`, `s`), so maps keyed by
/// `ShipType` iterate in the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShipType {
    #[serde(rename = "w")]
    Warship,
    #[serde(rename = "c")]
    Cruiser,
    #[serde(rename = "s")]
    Submarine,
}

impl ShipType {
    /// Hit points a fresh ship of this type starts with.
    pub const fn max_hp(self) -> u32 {
        match self {
            ShipType::Warship => 3,
            ShipType::Cruiser => 2,
            ShipType::Submarine => 1,
        }
    }

    /// Slot of this type in a fleet table.
    pub const fn index(self) -> usize {
        match self {
            ShipType::Warship => 0,
            ShipType::Cruiser => 1,
            ShipType::Submarine => 2,
        }
    }

    /// One-letter wire name.
    pub const fn letter(self) -> &'static str {
        match self {
            ShipType::Warship => "w",
            ShipType::Cruiser => "c",
            ShipType::Submarine => "s",
        }
    }

    /// Look up a type by its wire name.
    pub fn parse(name: &str) -> Option<ShipType> {
        match name {
            "w" => Some(ShipType::Warship),
            "c" => Some(ShipType::Cruiser),
            "s" => Some(ShipType::Submarine),
            _ => None,
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

impl FromStr for ShipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipType::parse(s).ok_or_else(|| format!("invalid ship type {s}"))
    }
}

/// A single ship: its type, where it is and how much damage it can still take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    position: Position,
    hp: u32,
}

impl Ship {
    /// Create a ship at full health.
    pub fn new(ship_type: ShipType, position: Position) -> Self {
        Self {
            ship_type,
            position,
            hp: ship_type.max_hp(),
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Move to `to`. Legality is checked by the owner of the ship.
    pub fn move_to(&mut self, to: Position) {
        self.position = to;
    }

    /// Take `amount` damage. Hit points never drop below zero.
    pub fn deal_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_sunk(&self) -> bool {
        self.hp == 0
    }

    /// Whether `to` lies on the same column or row as the ship.
    pub fn is_reachable(&self, to: Position) -> bool {
        self.position.0 == to.0 || self.position.1 == to.1
    }

    /// Whether `to` is the ship's own cell or one of its eight neighbours.
    pub fn in_attack_range(&self, to: Position) -> bool {
        self.position.0.abs_diff(to.0) <= 1 && self.position.1.abs_diff(to.1) <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ship_has_max_hp() {
        let ship = Ship::new(ShipType::Warship, Position(1, 2));
        assert_eq!(ship.hp(), 3);
        assert_eq!(Ship::new(ShipType::Cruiser, Position(0, 0)).hp(), 2);
        assert_eq!(Ship::new(ShipType::Submarine, Position(0, 0)).hp(), 1);
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut ship = Ship::new(ShipType::Cruiser, Position(0, 0));
        ship.deal_damage(1);
        assert_eq!(ship.hp(), 1);
        assert!(!ship.is_sunk());
        ship.deal_damage(5);
        assert_eq!(ship.hp(), 0);
        assert!(ship.is_sunk());
    }

    #[test]
    fn reachable_along_row_or_column() {
        let ship = Ship::new(ShipType::Warship, Position(2, 2));
        assert!(ship.is_reachable(Position(2, 4)));
        assert!(ship.is_reachable(Position(0, 2)));
        assert!(ship.is_reachable(Position(2, 2)));
        assert!(!ship.is_reachable(Position(3, 3)));
    }

    #[test]
    fn attack_range_is_chebyshev_one() {
        let ship = Ship::new(ShipType::Warship, Position(2, 2));
        for x in 1..=3 {
            for y in 1..=3 {
                assert!(ship.in_attack_range(Position(x, y)));
            }
        }
        assert!(!ship.in_attack_range(Position(0, 2)));
        assert!(!ship.in_attack_range(Position(4, 4)));
        assert!(!ship.in_attack_range(Position(i32::MIN, i32::MAX)));
    }

    #[test]
    fn type_wire_names() {
        assert_eq!(ShipType::parse("w"), Some(ShipType::Warship));
        assert_eq!(ShipType::parse("x"), None);
        assert_eq!(serde_json::to_string(&ShipType::Cruiser).unwrap(), "\"c\"");
        assert!(ShipType::Warship < ShipType::Cruiser && ShipType::Cruiser < ShipType::Submarine);
    }
}
