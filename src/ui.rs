//! ASCII boards printed by the server and the interactive player.

use crate::core::{Field, Position};
use crate::protocol::{FleetView, Report, TurnResult};

/// Draw `field` with `fleet` on top.
///
/// Rock is `*`, the cell hit by the last attack is `!` and every ship shows
/// as its letter followed by its hit points, e.g. `w3`.
pub fn render_fleet(field: &Field, fleet: &FleetView, attacked: Option<Position>) -> String {
    let (width, height) = (field.width(), field.height());
    let mut table: Vec<Vec<String>> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let p = Position(x, y);
                    if attacked == Some(p) {
                        "!".to_string()
                    } else if field.passable(p) {
                        String::new()
                    } else {
                        "*".to_string()
                    }
                })
                .collect()
        })
        .collect();

    for (ship_type, view) in fleet {
        let Some(Position(x, y)) = view.position else {
            continue;
        };
        if (0..width).contains(&x) && (0..height).contains(&y) {
            table[y as usize][x as usize].push_str(&format!("{}{}", ship_type, view.hp));
        }
    }

    let mut lines = Vec::with_capacity(height as usize + 2);
    let mut header = String::from("    |");
    for x in 0..width {
        header.push_str(&format!("{:^4}|", x));
    }
    lines.push(header);
    lines.push(format!("----+{}", "----+".repeat(width as usize)));
    for (y, row) in table.iter().enumerate() {
        let mut line = format!("{:>3} |", y);
        for cell in row {
            line.push_str(&format!("{:^4}|", cell));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Both boards after player `c` acted: player 1 on the left, player 2 on the
/// right, the attacked cell marked on the defender's board.
pub fn render_report(field: &Field, reports: &[Report; 2], c: usize) -> String {
    let fleets = [
        &reports[c].observation.me,
        &reports[1 - c].observation.me,
    ];
    let attacked = match &reports[1].result {
        Some(TurnResult::Attacked(Some(report))) => Some(report.position),
        _ => None,
    };
    let left = render_fleet(field, fleets[0], attacked.filter(|_| c == 1));
    let right = render_fleet(field, fleets[1], attacked.filter(|_| c == 0));
    left.lines()
        .zip(right.lines())
        .map(|(l, r)| format!("{} {}", l, r))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn report_field(field: &Field, reports: &[Report; 2], c: usize) {
    println!("{}", render_report(field, reports, c));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameControl, ShipType};
    use crate::protocol::{Action, Placement, ShipView};

    #[test]
    fn draws_rock_and_ships() {
        let field = Field::new(2, 3, vec![Position(2, 1)]).unwrap();
        let mut fleet = FleetView::new();
        fleet.insert(
            ShipType::Warship,
            ShipView {
                hp: 3,
                position: Some(Position(1, 0)),
            },
        );
        let view = render_fleet(&field, &fleet, Some(Position(0, 1)));
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "    | 0  | 1  | 2  |");
        assert_eq!(lines[2], "  0 |    | w3 |    |");
        assert_eq!(lines[3], "  1 | !  |    | *  |");
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn attack_marks_defender_board() {
        let field = Field::default();
        let p1: Placement = [(ShipType::Warship, Position(0, 0))].into_iter().collect();
        let p2: Placement = [(ShipType::Warship, Position(1, 1))].into_iter().collect();
        let mut game = GameControl::new(field.clone(), [&p1, &p2]).unwrap();
        let reports = game.action(0, &Action::attack(Position(1, 1)));
        let view = render_report(&field, &reports, 0);
        let row1 = view.lines().nth(3).unwrap();
        let (left, right) = row1.split_at(row1.len() / 2);
        assert!(!left.contains('!'));
        assert!(right.contains("!w2"));
    }
}
