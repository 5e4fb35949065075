use clap::Args;
use tokio::time::Duration;

use crate::core::{
    config::{DEFAULT_HEIGHT, DEFAULT_PORT, DEFAULT_WIDTH, TURN_LIMIT},
    Field, FieldError,
};
use crate::server::SessionOptions;

/// Options of the game server.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Hostname or IP address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
    /// Port number to listen on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    pub games: usize,
    /// Do not print the boards after every turn.
    #[arg(long)]
    pub quiet: bool,
    /// Log every line sent to or received from the players.
    #[arg(long)]
    pub verbose: bool,
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub field_width: i32,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub field_height: i32,
    /// Make the four corners of the field impassable.
    #[arg(long)]
    pub rounded_field: bool,
    /// Turns played before a game is declared a draw.
    #[arg(long, default_value_t = TURN_LIMIT)]
    pub turn_limit: usize,
    /// Seconds to wait for a player's line before aborting the game. Waits forever if unset.
    #[arg(long)]
    pub read_timeout: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            games: 1,
            quiet: false,
            verbose: false,
            field_width: DEFAULT_WIDTH,
            field_height: DEFAULT_HEIGHT,
            rounded_field: false,
            turn_limit: TURN_LIMIT,
            read_timeout: None,
        }
    }
}

impl ServerConfig {
    /// Build the field every game is played on.
    pub fn field(&self) -> Result<Field, FieldError> {
        if self.rounded_field {
            Field::rounded(self.field_height, self.field_width)
        } else {
            Field::new(self.field_height, self.field_width, Vec::new())
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            turn_limit: self.turn_limit,
            quiet: self.quiet,
        }
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout.map(Duration::from_secs)
    }
}
