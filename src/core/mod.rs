//! Core submarine game rules
//!
//! Pure game state with no I/O: the field, ships, each player's fleet and
//! the arbiter that applies actions. The network layers in `server` and
//! `player` are built on top of this module.

pub mod client;
pub mod common;
pub mod config;
pub mod control;
pub mod field;
pub mod ship;

// Re-export commonly used types
pub use client::Client;
pub use common::{FieldError, PlacementError, Position};
pub use config::*;
pub use control::{GameControl, SetupError};
pub use field::Field;
pub use ship::{Ship, ShipType};
