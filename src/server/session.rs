//! One match between two connected players.

use log::{debug, error, info};
use thiserror::Error;

use crate::core::{
    config::{DRAW, TURN_LIMIT, WAITING, YOUR_TURN, YOU_LOSE, YOU_WIN},
    Field, GameControl, SetupError,
};
use crate::protocol::{self, Action, Placement, ProtocolError};
use crate::transport::Transport;
use crate::ui;

/// Why a match was aborted.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A player closed its connection while the server expected a line.
    #[error("player {} disconnected", .player + 1)]
    Disconnected { player: usize },
    #[error(transparent)]
    InvalidPlacement(#[from] SetupError),
    /// A line did not fit the protocol at the point it was received.
    #[error("protocol error from player {}: {}", .player + 1, .source)]
    Protocol {
        player: usize,
        #[source]
        source: ProtocolError,
    },
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Per-match settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Turns played before the match is declared a draw.
    pub turn_limit: usize,
    /// Skip printing the boards after every turn.
    pub quiet: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            turn_limit: TURN_LIMIT,
            quiet: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Index of the winning player.
    Winner(usize),
    Draw,
}

/// Result of a completed match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub names: [String; 2],
    pub outcome: Outcome,
    pub turns: usize,
}

impl MatchSummary {
    pub fn winner_name(&self) -> Option<&str> {
        match self.outcome {
            Outcome::Winner(w) => Some(&self.names[w]),
            Outcome::Draw => None,
        }
    }
}

pub type Transports = [Box<dyn Transport>; 2];

/// Borrow the connections of player `c` and its opponent, in that order.
fn split(
    transports: &mut Transports,
    c: usize,
) -> (&mut Box<dyn Transport>, &mut Box<dyn Transport>) {
    let [t0, t1] = transports;
    if c == 0 {
        (t0, t1)
    } else {
        (t1, t0)
    }
}

async fn send_line(
    transport: &mut Box<dyn Transport>,
    player: usize,
    line: &str,
) -> Result<(), SessionError> {
    debug!("> player {} {}", player + 1, line);
    transport.send(line).await?;
    Ok(())
}

async fn recv_line(transport: &mut Box<dyn Transport>, player: usize) -> Result<String, SessionError> {
    match transport.recv().await? {
        Some(line) => {
            debug!("< player {} {}", player + 1, line);
            Ok(line)
        }
        None => Err(SessionError::Disconnected { player }),
    }
}

/// Play one turn for player `c`.
///
/// Returns the index of the winner if this turn ended the match.
pub async fn step(
    turn: usize,
    c: usize,
    game: &mut GameControl,
    transports: &mut Transports,
    options: &SessionOptions,
) -> Result<Option<usize>, SessionError> {
    let (active, passive) = split(transports, c);
    send_line(active, c, YOUR_TURN).await?;
    send_line(passive, 1 - c, WAITING).await?;

    let line = match recv_line(active, c).await {
        Err(SessionError::Disconnected { player }) => {
            error!("client disconnected at time {}", turn);
            return Err(SessionError::Disconnected { player });
        }
        other => other?,
    };
    debug!("action turn={} player={} {}", turn, c + 1, line);
    let action: Action = protocol::decode("action", &line)
        .map_err(|source| SessionError::Protocol { player: c, source })?;

    let reports = game.action(c, &action);
    if !options.quiet {
        ui::report_field(game.field(), &reports, c);
    }
    let [to_active, to_passive] = &reports;
    let protocol_err = |source| SessionError::Protocol { player: c, source };
    send_line(active, c, &protocol::encode("report", to_active).map_err(protocol_err)?).await?;
    send_line(passive, 1 - c, &protocol::encode("report", to_passive).map_err(protocol_err)?)
        .await?;

    Ok(to_active.outcome.map(|won| if won { c } else { 1 - c }))
}

/// Play a full match on `field` between two players that have already been
/// greeted. The first transport moves first.
pub async fn play_game(
    field: &Field,
    transports: &mut Transports,
    options: &SessionOptions,
) -> Result<MatchSummary, SessionError> {
    let mut names: [String; 2] = Default::default();
    for (player, transport) in transports.iter_mut().enumerate() {
        names[player] = recv_line(transport, player).await?;
    }
    play_named_game(field, names, transports, options).await
}

/// Like [`play_game`], for players whose names were already read.
pub async fn play_named_game(
    field: &Field,
    names: [String; 2],
    transports: &mut Transports,
    options: &SessionOptions,
) -> Result<MatchSummary, SessionError> {
    info!("start game for {:?}", names);

    let field_rep = field.to_json();
    for (player, transport) in transports.iter_mut().enumerate() {
        send_line(transport, player, &field_rep).await?;
    }

    let mut placements: [Placement; 2] = Default::default();
    for (player, transport) in transports.iter_mut().enumerate() {
        let line = recv_line(transport, player).await?;
        placements[player] = protocol::decode("placement", &line)
            .map_err(|source| SessionError::Protocol { player, source })?;
    }
    let mut game = match GameControl::new(field.clone(), [&placements[0], &placements[1]]) {
        Ok(game) => game,
        Err(e) => {
            error!("error in initial ship placement {}", e);
            return Err(e.into());
        }
    };

    let mut c = 0;
    let mut turns = 0;
    let mut winner = None;
    if !options.quiet {
        ui::report_field(field, &game.initial_condition(c), c);
    }
    while winner.is_none() && turns < options.turn_limit {
        winner = step(turns + 1, c, &mut game, transports, options).await?;
        c = 1 - c;
        turns += 1;
    }

    let outcome = match winner {
        Some(w) => {
            send_line(&mut transports[w], w, YOU_WIN).await?;
            send_line(&mut transports[1 - w], 1 - w, YOU_LOSE).await?;
            info!("player {} {} win", w + 1, names[w]);
            Outcome::Winner(w)
        }
        None => {
            for (player, transport) in transports.iter_mut().enumerate() {
                send_line(transport, player, DRAW).await?;
            }
            info!("draw");
            Outcome::Draw
        }
    };

    Ok(MatchSummary {
        names,
        outcome,
        turns,
    })
}
