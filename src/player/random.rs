use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::core::{config::SHIPS, Field, Position, ShipType};
use crate::protocol::{Action, Placement};

use super::{Player, PlayerState};

/// Player that places its ships on distinct random squares and then picks a
/// move or an attack with equal odds, always among legal targets.
pub struct RandomPlayer {
    name: String,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self::with_name("random-player")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

fn legal_moves(state: &PlayerState) -> Vec<(ShipType, Position)> {
    let mut moves = Vec::new();
    for (ship_type, _) in state.ships() {
        for &to in state.field().squares() {
            if state.can_move(ship_type, to) {
                moves.push((ship_type, to));
            }
        }
    }
    moves
}

impl Player for RandomPlayer {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn decide_placement(&mut self, rng: &mut SmallRng, field: &Field) -> anyhow::Result<Placement> {
        let squares = field.squares();
        if squares.len() < SHIPS.len() {
            return Err(anyhow::anyhow!(
                "field has {} free squares, {} ships to place",
                squares.len(),
                SHIPS.len()
            ));
        }
        Ok(SHIPS
            .iter()
            .copied()
            .zip(squares.choose_multiple(rng, SHIPS.len()).copied())
            .collect())
    }

    fn decide_action(&mut self, rng: &mut SmallRng, state: &PlayerState) -> anyhow::Result<Action> {
        let moves = legal_moves(state);
        if !moves.is_empty() && rng.random_bool(0.5) {
            if let Some(&(ship_type, to)) = moves.choose(rng) {
                return Ok(Action::move_ship(ship_type, to));
            }
        }
        let targets: Vec<Position> = state
            .field()
            .squares()
            .iter()
            .copied()
            .filter(|&to| state.in_attack_range(to))
            .collect();
        targets
            .choose(rng)
            .map(|&to| Action::attack(to))
            .ok_or_else(|| anyhow::anyhow!("no legal action left"))
    }
}
