use std::sync::Arc;

use proptest::prelude::*;
use proptest::sample::subsequence;
use submarine::core::{Client, Field, Position, ShipType, SHIPS};
use submarine::protocol::Placement;

fn cells(width: i32, height: i32) -> Vec<Position> {
    (0..width)
        .flat_map(|x| (0..height).map(move |y| Position(x, y)))
        .collect()
}

fn field_strategy() -> impl Strategy<Value = Field> {
    (1..8i32, 1..8i32).prop_flat_map(|(width, height)| {
        let all = cells(width, height);
        let n = all.len();
        subsequence(all, 0..=n).prop_map(move |rock| Field::new(height, width, rock).unwrap())
    })
}

/// A 5x5 field with three rocks and a fleet on distinct free squares.
fn client_strategy() -> impl Strategy<Value = Client> {
    subsequence(cells(5, 5), 6).prop_map(|picked| {
        let field = Field::new(5, 5, picked[3..].to_vec()).unwrap();
        let placement: Placement = SHIPS.iter().copied().zip(picked[..3].iter().copied()).collect();
        Client::new(Arc::new(field), &placement).unwrap()
    })
}

fn positions(client: &Client) -> Vec<(ShipType, Position, u32)> {
    client
        .ships()
        .map(|s| (s.ship_type(), s.position(), s.hp()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn field_json_round_trip(field in field_strategy()) {
        let back = Field::from_json(&field.to_json()).unwrap();
        for x in -1..=field.width() {
            for y in -1..=field.height() {
                let p = Position(x, y);
                prop_assert_eq!(field.passable(p), back.passable(p));
            }
        }
        prop_assert_eq!(back.squares(), field.squares());
    }

    #[test]
    fn observation_hides_positions_from_opponent(client in client_strategy()) {
        let hidden = client.observation(false);
        let shown = client.observation(true);
        prop_assert_eq!(hidden.len(), 3);
        prop_assert!(hidden.values().all(|v| v.position.is_none()));
        prop_assert!(shown.values().all(|v| v.position.is_some()));
        let wire = serde_json::to_string(&hidden).unwrap();
        prop_assert!(!wire.contains("position"));
    }

    #[test]
    fn move_is_legal_exactly_when_rules_allow(
        mut client in client_strategy(),
        idx in 0..3usize,
        x in -1..6i32,
        y in -1..6i32,
    ) {
        let ship_type = SHIPS[idx];
        let to = Position(x, y);
        let from = client.ship(ship_type).unwrap().position();
        let allowed = client.field().passable(to)
            && (from.x() == to.x() || from.y() == to.y())
            && client.overlap(to).is_none();
        let before = positions(&client);

        match client.move_ship(ship_type, to) {
            Some(report) => {
                prop_assert!(allowed);
                prop_assert_eq!(report.ship, ship_type);
                prop_assert_eq!(report.distance, Position(x - from.x(), y - from.y()));
                prop_assert_eq!(client.ship(ship_type).unwrap().position(), to);
            }
            None => {
                prop_assert!(!allowed);
                prop_assert_eq!(positions(&client), before);
            }
        }
    }

    #[test]
    fn attack_hits_once_and_reports_neighbours(
        mut client in client_strategy(),
        x in -1..6i32,
        y in -1..6i32,
    ) {
        let to = Position(x, y);
        let before = positions(&client);
        let report = client.attacked(to);
        if !client.field().passable(to) {
            prop_assert!(report.is_none());
            prop_assert_eq!(positions(&client), before);
            return Ok(());
        }
        let report = report.unwrap();

        let occupant = before.iter().find(|(_, p, _)| *p == to);
        prop_assert_eq!(report.hit, occupant.map(|(t, _, _)| *t));
        let expected_near: Vec<ShipType> = before
            .iter()
            .filter(|(_, p, _)| *p != to && p.x().abs_diff(x) <= 1 && p.y().abs_diff(y) <= 1)
            .map(|(t, _, _)| *t)
            .collect();
        prop_assert_eq!(&report.near, &expected_near);

        for (ship_type, _, hp) in &before {
            let now = client.ship(*ship_type).map(|s| s.hp()).unwrap_or(0);
            let expected = if Some(*ship_type) == report.hit { hp - 1 } else { *hp };
            prop_assert_eq!(now, expected);
        }
    }
}

#[test]
fn sunk_ship_no_longer_reported() {
    let field = Arc::new(Field::default());
    let placement: Placement = serde_json::from_str(r#"{"w":[0,0],"s":[1,1]}"#).unwrap();
    let mut client = Client::new(field, &placement).unwrap();

    let first = client.attacked(Position(1, 1)).unwrap();
    assert_eq!(first.hit, Some(ShipType::Submarine));
    assert_eq!(first.near, vec![ShipType::Warship]);

    let second = client.attacked(Position(0, 1)).unwrap();
    assert_eq!(second.hit, None);
    assert_eq!(second.near, vec![ShipType::Warship]);
    assert!(client.ship(ShipType::Submarine).is_none());
}
