pub mod config;
pub mod core;
mod logging;
pub mod player;
pub mod protocol;
pub mod server;
pub mod transport;
pub mod ui;

pub use crate::config::ServerConfig;
pub use crate::core::{
    Client, Field, FieldError, GameControl, PlacementError, Position, SetupError, Ship, ShipType,
};
pub use logging::init_logging;
pub use player::{CliPlayer, Player, PlayerNode, PlayerState, RandomPlayer};
pub use protocol::{
    Action, AttackReport, GameStatus, MoveReport, Notice, Observation, Placement, ProtocolError,
    Report, TurnResult,
};
pub use server::{
    play_game, play_local, play_named_game, server_main, MatchSummary, Outcome, Server,
    SessionError, SessionOptions, Tally,
};
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
