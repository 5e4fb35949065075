use std::io::{self, BufRead, BufReader, Write};

use rand::rngs::SmallRng;

use crate::core::{config::SHIPS, Field, Position, ShipType};
use crate::protocol::{
    Action, AttackReport, FleetView, MoveReport, Notice, Observation, Placement, TurnResult,
};
use crate::ui::render_fleet;

use super::{Player, PlayerState};

/// Player controlled from the terminal. Illegal choices are refused locally
/// and asked for again, so the server never sees them.
pub struct CliPlayer {
    name: String,
    input: Box<dyn BufRead + Send>,
}

impl CliPlayer {
    pub fn new() -> Self {
        Self::with_input("manual-player", BufReader::new(io::stdin()))
    }

    /// Read answers from `input` instead of stdin.
    pub fn with_input(name: impl Into<String>, input: impl BufRead + Send + 'static) -> Self {
        Self {
            name: name.into(),
            input: Box::new(input),
        }
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<String> {
        print!("{}", text);
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(anyhow::anyhow!("input closed"));
        }
        Ok(line.trim().to_string())
    }

    fn input_position(&mut self, field: &Field) -> anyhow::Result<Position> {
        loop {
            let x = self.prompt("x = ")?;
            let y = self.prompt("y = ")?;
            if let (Ok(x), Ok(y)) = (x.parse(), y.parse()) {
                let position = Position(x, y);
                if field.passable(position) {
                    return Ok(position);
                }
            }
            println!("out of field");
        }
    }

    fn input_ship(&mut self, state: &PlayerState) -> anyhow::Result<ShipType> {
        let mut answer = self.prompt("select your ship: warship(w), cruiser(c), or submarine(s) ")?;
        loop {
            if let Some(ship_type) = ShipType::parse(&answer) {
                if state.fleet().contains_key(&ship_type) {
                    return Ok(ship_type);
                }
            }
            println!("please input existing ship");
            answer = self.prompt("select your ship: ")?;
        }
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// `moved w by >>`: one arrow per square travelled.
pub fn describe_move(moved: &MoveReport) -> String {
    let Position(dx, dy) = moved.distance;
    let arrow = if dx > 0 {
        ">".repeat(dx as usize)
    } else if dx < 0 {
        "<".repeat(dx.unsigned_abs() as usize)
    } else if dy > 0 {
        "v".repeat(dy as usize)
    } else {
        "^".repeat(dy.unsigned_abs() as usize)
    };
    format!("moved {} by {}", moved.ship, arrow)
}

pub fn describe_attack(attacked: &AttackReport) -> String {
    let mut msg = format!("attacked {}", attacked.position);
    if let Some(hit) = attacked.hit {
        msg.push_str(&format!(" hit {}", hit));
    }
    let near: Vec<&str> = attacked.near.iter().map(|t| t.letter()).collect();
    msg.push_str(&format!(" near {:?}", near));
    msg
}

/// Remaining hit points of the opponent's ships.
pub fn describe_opponent(observation: &Observation) -> String {
    let mut msg = String::from("opponent ships:");
    for (ship_type, view) in &observation.opponent {
        msg.push_str(&format!(" {}:{}", ship_type, view.hp));
    }
    msg
}

impl Player for CliPlayer {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn decide_placement(&mut self, _rng: &mut SmallRng, field: &Field) -> anyhow::Result<Placement> {
        println!("{}", render_fleet(field, &FleetView::new(), None));
        let mut msg = format!(
            "please input x, y in ([0, {}] x [0, {}])",
            field.width() - 1,
            field.height() - 1
        );
        if !field.rock().is_empty() {
            let rock: Vec<String> = field.rock().iter().map(ToString::to_string).collect();
            msg.push_str(&format!(" except for {}", rock.join(", ")));
        }
        println!("{}", msg);

        let mut placement = Placement::new();
        for ship_type in SHIPS {
            println!("{}", ship_type);
            let mut position = self.input_position(field)?;
            while placement.values().any(|&p| p == position) {
                println!("position overlapping");
                position = self.input_position(field)?;
            }
            placement.insert(ship_type, position);
        }
        Ok(placement)
    }

    fn decide_action(&mut self, _rng: &mut SmallRng, state: &PlayerState) -> anyhow::Result<Action> {
        let mut act = String::new();
        while act != "m" && act != "a" {
            act = self.prompt("select your action: move (m) or attack (a) ?  ")?;
        }

        if act == "m" {
            let ship_type = self.input_ship(state)?;
            let mut to = self.input_position(state.field())?;
            while !state.can_move(ship_type, to) {
                println!("you can't move {} to {}", ship_type, to);
                to = self.input_position(state.field())?;
            }
            Ok(Action::move_ship(ship_type, to))
        } else {
            let mut to = self.input_position(state.field())?;
            while !state.in_attack_range(to) {
                println!("you can't attack {}", to);
                to = self.input_position(state.field())?;
            }
            Ok(Action::attack(to))
        }
    }

    fn handle_report(&mut self, state: &PlayerState, notice: Notice) {
        let Some(report) = state.last() else {
            return;
        };
        let actor = if notice == Notice::YourTurn { "you" } else { "opponent" };
        let mut attacked = None;
        match &report.result {
            Some(TurnResult::Moved(Some(moved))) => println!("{} {}", actor, describe_move(moved)),
            Some(TurnResult::Attacked(Some(report))) => {
                attacked = Some(report.position);
                println!("{} {}", actor, describe_attack(report));
            }
            Some(_) => println!("{} made an illegal action", actor),
            None => {}
        }
        println!("{}", describe_opponent(&report.observation));
        if notice == Notice::Waiting {
            println!("{}", render_fleet(state.field(), state.fleet(), attacked));
        }
        println!();
    }
}
