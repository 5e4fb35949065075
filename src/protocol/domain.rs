//! Payloads exchanged as JSON lines between the server and the players.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{common::Position, ship::ShipType};

/// Initial placement sent by a player: `{"w":[x,y],"c":[x,y],"s":[x,y]}`.
pub type Placement = BTreeMap<ShipType, Position>;

/// What a player does on its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// `{"move":{"ship":T,"to":[x,y]}}`. The ship name is kept as sent so an
    /// unknown name is judged as an illegal move rather than a malformed line.
    Move { ship: String, to: Position },
    /// `{"attack":{"to":[x,y]}}`.
    Attack { to: Position },
}

impl Action {
    pub fn move_ship(ship: ShipType, to: Position) -> Self {
        Action::Move {
            ship: ship.letter().to_string(),
            to,
        }
    }

    pub fn attack(to: Position) -> Self {
        Action::Attack { to }
    }
}

/// Outcome of a legal move, as told to the opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub ship: ShipType,
    /// `to - from`.
    pub distance: Position,
}

/// Outcome of a legal attack, as told to both players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit: Option<ShipType>,
    /// Surviving ships next to `position`, excluding the one hit.
    pub near: Vec<ShipType>,
}

/// `{"moved": ...}` or `{"attacked": ...}`; an illegal action is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnResult {
    #[serde(with = "verdict")]
    Moved(Option<MoveReport>),
    #[serde(with = "verdict")]
    Attacked(Option<AttackReport>),
}

impl TurnResult {
    /// Whether the action was legal.
    pub fn is_legal(&self) -> bool {
        match self {
            TurnResult::Moved(r) => r.is_some(),
            TurnResult::Attacked(r) => r.is_some(),
        }
    }
}

/// Encodes `None` as JSON `false` and `Some(v)` as `v`.
mod verdict {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T: Serialize, S: Serializer>(
        value: &Option<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, T: Deserialize<'de>, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<T>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Rejected(bool),
            Accepted(T),
        }

        match Repr::<T>::deserialize(deserializer)? {
            Repr::Accepted(v) => Ok(Some(v)),
            Repr::Rejected(false) => Ok(None),
            Repr::Rejected(true) => Err(D::Error::custom("expected false or a report")),
        }
    }
}

/// State of one surviving ship. `position` is withheld from the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipView {
    pub hp: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Surviving ships of one fleet, in canonical type order.
pub type FleetView = BTreeMap<ShipType, ShipView>;

/// Both fleets as seen by one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub me: FleetView,
    pub opponent: FleetView,
}

/// Line sent to each player after every action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TurnResult>,
    /// Present only when the match ends: `true` for the winner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<bool>,
    pub observation: Observation,
}
