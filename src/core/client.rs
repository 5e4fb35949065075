//! Server-side view of one player: its fleet and the rules applied to it.

use std::sync::Arc;

use crate::protocol::{AttackReport, FleetView, MoveReport, Placement, ShipView};

use super::common::{PlacementError, Position};
use super::config::NUM_SHIPS;
use super::field::Field;
use super::ship::{Ship, ShipType};

/// One side of a match: a fleet of at most one ship per type on a shared field.
#[derive(Debug, Clone)]
pub struct Client {
    field: Arc<Field>,
    ships: [Option<Ship>; NUM_SHIPS],
}

impl Client {
    /// Place a fleet on `field`.
    ///
    /// Fails if two ships share a cell, a ship is not on a passable cell, or
    /// the placement is empty.
    pub fn new(field: Arc<Field>, placement: &Placement) -> Result<Self, PlacementError> {
        if placement.is_empty() {
            return Err(PlacementError::Empty);
        }
        let mut client = Self {
            field,
            ships: [None; NUM_SHIPS],
        };
        for (&ship_type, &position) in placement {
            if client.overlap(position).is_some() {
                return Err(PlacementError::Overlapping(position));
            }
            if !client.field.passable(position) {
                return Err(PlacementError::Impassable(ship_type, position));
            }
            client.ships[ship_type.index()] = Some(Ship::new(ship_type, position));
        }
        Ok(client)
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Surviving ships in canonical type order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    pub fn ship(&self, ship_type: ShipType) -> Option<&Ship> {
        self.ships[ship_type.index()].as_ref()
    }

    /// True once every ship has been sunk.
    pub fn is_defeated(&self) -> bool {
        self.ships.iter().all(Option::is_none)
    }

    /// Move `ship_type` to `to`.
    ///
    /// Returns `None` and leaves the fleet untouched if the ship does not
    /// exist, `to` is not passable, not on the ship's row or column, or
    /// already holds another ship of this fleet.
    pub fn move_ship(&mut self, ship_type: ShipType, to: Position) -> Option<MoveReport> {
        let ship = self.ships[ship_type.index()]?;
        if !self.field.passable(to) || !ship.is_reachable(to) || self.overlap(to).is_some() {
            return None;
        }
        let distance = ship.position().offset_to(to);
        self.ships[ship_type.index()].as_mut()?.move_to(to);
        Some(MoveReport {
            ship: ship_type,
            distance,
        })
    }

    /// Resolve an incoming attack at `to`.
    ///
    /// The ship on `to`, if any, loses one hit point and is removed when it
    /// reaches zero. Other surviving ships within range of `to` are reported
    /// as `near`. Returns `None` if `to` is not passable.
    pub fn attacked(&mut self, to: Position) -> Option<AttackReport> {
        if !self.field.passable(to) {
            return None;
        }
        let near = self.near(to);
        let hit = self.overlap(to);
        if let Some(ship_type) = hit {
            let slot = &mut self.ships[ship_type.index()];
            if let Some(ship) = slot.as_mut() {
                ship.deal_damage(1);
                if ship.is_sunk() {
                    *slot = None;
                }
            }
        }
        Some(AttackReport {
            position: to,
            hit,
            near,
        })
    }

    /// Hit points of every surviving ship; positions only when `reveal` is set.
    pub fn observation(&self, reveal: bool) -> FleetView {
        self.ships()
            .map(|ship| {
                let view = ShipView {
                    hp: ship.hp(),
                    position: reveal.then(|| ship.position()),
                };
                (ship.ship_type(), view)
            })
            .collect()
    }

    /// Whether this fleet may fire at `to`: it must be passable and within
    /// range of at least one surviving ship.
    pub fn in_attack_range(&self, to: Position) -> bool {
        self.field.passable(to) && self.ships().any(|ship| ship.in_attack_range(to))
    }

    /// Type of the ship at `position`, if any.
    pub fn overlap(&self, position: Position) -> Option<ShipType> {
        self.ships()
            .find(|ship| ship.position() == position)
            .map(Ship::ship_type)
    }

    /// Ships next to `to`, not counting one standing on `to`.
    pub fn near(&self, to: Position) -> Vec<ShipType> {
        self.ships()
            .filter(|ship| ship.position() != to && ship.in_attack_range(to))
            .map(Ship::ship_type)
            .collect()
    }
}
