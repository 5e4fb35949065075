use log::{debug, info};
use rand::rngs::SmallRng;

use crate::{
    core::{config::GREETING, Field},
    player::{Player, PlayerState},
    protocol::{self, GameStatus, Notice, ProtocolError, Report},
    transport::Transport,
};

/// Client side of a match: answers the server on behalf of a [`Player`].
pub struct PlayerNode {
    player: Box<dyn Player>,
    transport: Box<dyn Transport>,
    state: Option<PlayerState>,
    status: GameStatus,
    turns: usize,
}

impl PlayerNode {
    pub fn new(player: Box<dyn Player>, transport: Box<dyn Transport>) -> Self {
        Self {
            player,
            transport,
            state: None,
            status: GameStatus::InProgress,
            turns: 0,
        }
    }

    async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        debug!("> {}", line);
        self.transport.send(line).await
    }

    async fn recv_line(&mut self, expected: &'static str) -> anyhow::Result<String> {
        match self.transport.recv().await? {
            Some(line) => {
                debug!("< {}", line);
                Ok(line)
            }
            None => Err(anyhow::anyhow!(
                "disconnected from server while waiting for {}",
                expected
            )),
        }
    }

    /// Play one match from the greeting to the final status line.
    pub async fn run(&mut self, rng: &mut SmallRng) -> anyhow::Result<GameStatus> {
        let greeting = self.recv_line("greeting").await?;
        if greeting != GREETING {
            return Err(ProtocolError::UnexpectedLine {
                expected: GREETING,
                got: greeting,
            }
            .into());
        }
        let name = self.player.display_name();
        info!("connect to server with name {}", name);
        self.send_line(&name).await?;

        let field = Field::from_json(&self.recv_line("field").await?)?;
        debug!("field is\n{}", field.to_ascii());
        let placement = self.player.decide_placement(rng, &field)?;
        self.send_line(&protocol::encode("placement", &placement)?)
            .await?;
        let mut state = PlayerState::new(field, &placement);

        loop {
            let notice = Notice::parse(&self.recv_line("turn or game status").await?)?;
            if let Some(status) = notice.status() {
                info!("t={} {}", self.turns + 1, notice.as_str());
                self.status = status;
                break;
            }
            self.turns += 1;
            debug!("t={} {}", self.turns, notice.as_str());
            if notice == Notice::YourTurn {
                let action = self.player.decide_action(rng, &state)?;
                self.send_line(&protocol::encode("action", &action)?).await?;
            }
            let report: Report = protocol::decode("report", &self.recv_line("report").await?)?;
            state.update(report);
            self.player.handle_report(&state, notice);
        }

        self.state = Some(state);
        Ok(self.status)
    }

    /// Final status once [`run`](Self::run) returned, `InProgress` before.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of turns played so far, by either side.
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn state(&self) -> Option<&PlayerState> {
        self.state.as_ref()
    }
}
