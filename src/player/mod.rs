//! Player trait and implementations
//!
//! This module defines the Player trait and provides concrete implementations:
//! - RandomPlayer: picks uniformly among legal placements and actions
//! - CliPlayer: Interactive command-line player
//! - PlayerNode: drives a Player through the server protocol over a Transport

use rand::rngs::SmallRng;

use crate::core::{Field, Position, ShipType};
use crate::protocol::{Action, FleetView, Notice, Placement, Report, ShipView};

/// Interface implemented by different player types.
///
/// A Player is responsible for:
/// - Naming itself to the server
/// - Placing ships on the field
/// - Choosing a move or an attack each turn
pub trait Player: Send {
    /// Name sent to the server after the greeting.
    fn display_name(&self) -> String;

    /// Choose the initial position of every ship.
    fn decide_placement(&mut self, rng: &mut SmallRng, field: &Field) -> anyhow::Result<Placement>;

    /// Choose the action for the current turn.
    fn decide_action(&mut self, rng: &mut SmallRng, state: &PlayerState) -> anyhow::Result<Action>;

    /// Inform the player of the report that closed a turn. `notice` tells
    /// whose turn it was.
    fn handle_report(&mut self, _state: &PlayerState, _notice: Notice) {}
}

/// What a player knows about the match: the field, its own fleet as last
/// reported by the server and the last report itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    field: Field,
    fleet: FleetView,
    last: Option<Report>,
}

impl PlayerState {
    pub fn new(field: Field, placement: &Placement) -> Self {
        let fleet = placement
            .iter()
            .map(|(&ship_type, &position)| {
                let view = ShipView {
                    hp: ship_type.max_hp(),
                    position: Some(position),
                };
                (ship_type, view)
            })
            .collect();
        Self {
            field,
            fleet,
            last: None,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn fleet(&self) -> &FleetView {
        &self.fleet
    }

    pub fn last(&self) -> Option<&Report> {
        self.last.as_ref()
    }

    /// Refresh the own fleet from the server's view of it.
    pub fn update(&mut self, report: Report) {
        self.fleet = report.observation.me.clone();
        self.last = Some(report);
    }

    /// Surviving ships with a known position.
    pub fn ships(&self) -> impl Iterator<Item = (ShipType, Position)> + '_ {
        self.fleet
            .iter()
            .filter_map(|(&ship_type, view)| view.position.map(|p| (ship_type, p)))
    }

    pub fn is_defeated(&self) -> bool {
        self.fleet.is_empty()
    }

    pub fn in_attack_range(&self, to: Position) -> bool {
        self.field.passable(to)
            && self
                .ships()
                .any(|(_, p)| p.x().abs_diff(to.x()) <= 1 && p.y().abs_diff(to.y()) <= 1)
    }

    pub fn overlap(&self, position: Position) -> Option<ShipType> {
        self.ships()
            .find(|&(_, p)| p == position)
            .map(|(ship_type, _)| ship_type)
    }

    /// Whether the server would accept moving `ship_type` to `to`.
    pub fn can_move(&self, ship_type: ShipType, to: Position) -> bool {
        let Some(from) = self.fleet.get(&ship_type).and_then(|view| view.position) else {
            return false;
        };
        self.field.passable(to)
            && (from.x() == to.x() || from.y() == to.y())
            && self.overlap(to).is_none()
    }
}

pub mod random;
pub use random::RandomPlayer;

pub mod cli;
pub use cli::CliPlayer;

pub mod node;
pub use node::PlayerNode;
