//! Match arbiter: applies the active player's action and builds the reports.

use std::sync::Arc;

use thiserror::Error;

use crate::protocol::{Action, Observation, Placement, Report, TurnResult};

use super::client::Client;
use super::common::PlacementError;
use super::field::Field;
use super::ship::ShipType;

/// A placement was rejected when setting up a match.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid placement from player {}: {}", .player + 1, .source)]
pub struct SetupError {
    /// Index (0 or 1) of the player whose placement was rejected.
    pub player: usize,
    #[source]
    pub source: PlacementError,
}

/// Holds both players of a match.
///
/// Players are indexed 0 and 1. For a turn taken by `c`, the waiting
/// player is `1 - c`, and the pair of reports returned by [`Self::action`]
/// is ordered `[active, passive]`.
#[derive(Debug, Clone)]
pub struct GameControl {
    field: Arc<Field>,
    clients: [Client; 2],
}

impl GameControl {
    pub fn new(field: Field, placements: [&Placement; 2]) -> Result<Self, SetupError> {
        let field = Arc::new(field);
        let place = |player: usize| {
            Client::new(field.clone(), placements[player])
                .map_err(|source| SetupError { player, source })
        };
        let clients = [place(0)?, place(1)?];
        Ok(Self { field, clients })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn client(&self, c: usize) -> &Client {
        &self.clients[c]
    }

    /// Both fleets as seen by player `c`.
    pub fn observation(&self, c: usize) -> Observation {
        Observation {
            me: self.clients[c].observation(true),
            opponent: self.clients[1 - c].observation(false),
        }
    }

    /// Observation-only reports before the first turn, `[c, 1 - c]`.
    pub fn initial_condition(&self, c: usize) -> [Report; 2] {
        [self.report(c), self.report(1 - c)]
    }

    fn report(&self, c: usize) -> Report {
        Report {
            observation: self.observation(c),
            ..Report::default()
        }
    }

    /// Apply `action` for player `c` and return `[active, passive]` reports.
    ///
    /// An illegal move or attack is not an error: it ends the match with
    /// `outcome: false` for `c`.
    pub fn action(&mut self, c: usize, action: &Action) -> [Report; 2] {
        let mut active = Report::default();
        let mut passive = Report::default();

        let legal = match action {
            Action::Attack { to } => {
                let result = if self.clients[c].in_attack_range(*to) {
                    self.clients[1 - c].attacked(*to)
                } else {
                    None
                };
                let legal = result.is_some();
                active.result = Some(TurnResult::Attacked(result.clone()));
                passive.result = Some(TurnResult::Attacked(result));
                if self.clients[1 - c].is_defeated() {
                    active.outcome = Some(true);
                    passive.outcome = Some(false);
                }
                legal
            }
            Action::Move { ship, to } => {
                let result = ShipType::parse(ship)
                    .and_then(|ship_type| self.clients[c].move_ship(ship_type, *to));
                let legal = result.is_some();
                // The mover already knows where it went.
                passive.result = Some(TurnResult::Moved(result));
                legal
            }
        };

        if !legal {
            active.outcome = Some(false);
            passive.outcome = Some(true);
        }

        active.observation = self.observation(c);
        passive.observation = self.observation(1 - c);
        [active, passive]
    }
}
