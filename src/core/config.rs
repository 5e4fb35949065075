use super::ship::ShipType;

/// First line the server sends on every new connection.
pub const GREETING: &str = "ok i heard you";
/// Sent to the player whose turn it is.
pub const YOUR_TURN: &str = "your turn";
/// Sent to the player waiting for the opponent's action.
pub const WAITING: &str = "waiting";
pub const YOU_WIN: &str = "you win";
pub const YOU_LOSE: &str = "you lose";
/// Sent to both players when the turn limit is reached.
pub const DRAW: &str = "even";

/// Turns played before a match is declared a draw.
pub const TURN_LIMIT: usize = 10_000;

pub const DEFAULT_HEIGHT: i32 = 5;
pub const DEFAULT_WIDTH: i32 = 5;
pub const DEFAULT_PORT: u16 = 2000;

pub const NUM_SHIPS: usize = 3;
/// Ship types in canonical order, which is also the order of every report.
pub const SHIPS: [ShipType; NUM_SHIPS] = [ShipType::Warship, ShipType::Cruiser, ShipType::Submarine];
