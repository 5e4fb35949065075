use submarine::core::{Field, GameControl, Position, ShipType};
use submarine::protocol::{Action, AttackReport, Placement, Report, TurnResult};

fn placement() -> Placement {
    serde_json::from_str(r#"{"w":[0,0],"c":[0,1],"s":[1,0]}"#).unwrap()
}

fn game() -> GameControl {
    let p = placement();
    GameControl::new(Field::default(), [&p, &p]).unwrap()
}

fn attack_report(report: &Report) -> &AttackReport {
    match &report.result {
        Some(TurnResult::Attacked(Some(r))) => r,
        other => panic!("expected a legal attack, got {:?}", other),
    }
}

#[test]
fn attack_damages_and_reports_near() {
    let mut game = game();
    let [active, passive] = game.action(0, &Action::attack(Position(0, 0)));

    for report in [&active, &passive] {
        let attacked = attack_report(report);
        assert_eq!(attacked.position, Position(0, 0));
        assert_eq!(attacked.hit, Some(ShipType::Warship));
        assert_eq!(attacked.near, vec![ShipType::Cruiser, ShipType::Submarine]);
        assert_eq!(report.outcome, None);
    }
    assert_eq!(passive.observation.me[&ShipType::Warship].hp, 2);
    assert_eq!(active.observation.opponent[&ShipType::Warship].hp, 2);
    assert_eq!(active.observation.opponent[&ShipType::Warship].position, None);

    let wire = serde_json::to_string(&passive).unwrap();
    assert!(wire.starts_with(r#"{"result":{"attacked":{"position":[0,0],"hit":"w","near":["c","s"]}},"observation""#));
}

#[test]
fn sunk_ship_leaves_fleet_and_match_continues() {
    let mut game = game();

    let [active, passive] = game.action(0, &Action::attack(Position(1, 0)));
    assert_eq!(attack_report(&active).hit, Some(ShipType::Submarine));
    assert!(!passive.observation.me.contains_key(&ShipType::Submarine));
    assert_eq!(active.outcome, None);

    for _ in 0..2 {
        let [active, passive] = game.action(0, &Action::attack(Position(1, 0)));
        let attacked = attack_report(&passive);
        assert_eq!(attacked.hit, None);
        assert_eq!(attacked.near, vec![ShipType::Warship, ShipType::Cruiser]);
        assert_eq!(active.outcome, None);
        assert_eq!(passive.outcome, None);
        assert!(!serde_json::to_string(&active).unwrap().contains("outcome"));
    }
    assert!(!game.client(1).is_defeated());
}

#[test]
fn emptying_a_fleet_wins_on_that_attack() {
    let mut game = game();
    let targets = [
        Position(1, 0),
        Position(0, 1),
        Position(0, 1),
        Position(0, 0),
        Position(0, 0),
    ];
    for to in targets {
        let [active, passive] = game.action(0, &Action::attack(to));
        assert_eq!(active.outcome, None);
        assert_eq!(passive.outcome, None);
    }

    let [active, passive] = game.action(0, &Action::attack(Position(0, 0)));
    assert_eq!(attack_report(&active).hit, Some(ShipType::Warship));
    assert_eq!(active.outcome, Some(true));
    assert_eq!(passive.outcome, Some(false));
    assert!(passive.observation.me.is_empty());
    assert!(game.client(1).is_defeated());
}

#[test]
fn moving_onto_own_ship_forfeits() {
    let mut game = game();
    let [active, passive] = game.action(1, &Action::move_ship(ShipType::Warship, Position(0, 1)));
    assert_eq!(active.outcome, Some(false));
    assert_eq!(passive.outcome, Some(true));
    assert_eq!(active.result, None);
    assert_eq!(passive.result, Some(TurnResult::Moved(None)));
    assert_eq!(
        serde_json::to_value(&passive).unwrap()["result"],
        serde_json::json!({"moved": false})
    );
    assert_eq!(
        game.client(1).ship(ShipType::Warship).unwrap().position(),
        Position(0, 0)
    );
}

#[test]
fn legal_move_reports_distance_to_opponent() {
    let mut game = game();
    let [active, passive] = game.action(0, &Action::move_ship(ShipType::Cruiser, Position(0, 4)));
    assert_eq!(active.result, None);
    assert_eq!(active.outcome, None);
    assert_eq!(
        serde_json::to_value(&passive).unwrap()["result"],
        serde_json::json!({"moved": {"ship": "c", "distance": [0, 3]}})
    );
    assert_eq!(
        active.observation.me[&ShipType::Cruiser].position,
        Some(Position(0, 4))
    );
}
