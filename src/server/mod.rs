//! Game server: accepts pairs of players and runs their matches one after
//! another.

pub mod session;

pub use session::{
    play_game, play_named_game, step, MatchSummary, Outcome, SessionError, SessionOptions,
    Transports,
};

use std::collections::BTreeMap;
use std::net::SocketAddr;

use log::{debug, error, info, warn};
use rand::rngs::SmallRng;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::time::Duration;

use crate::config::ServerConfig;
use crate::core::{config::GREETING, Field};
use crate::player::{Player, PlayerNode};
use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};

/// Wins per `name@ip`.
pub type Tally = BTreeMap<String, usize>;

/// Send the greeting every new connection starts with.
pub async fn greet(transport: &mut dyn Transport) -> anyhow::Result<()> {
    debug!("> {}", GREETING);
    transport.send(GREETING).await
}

/// Greet a new connection and read the name it answers with.
async fn handshake(transport: &mut TcpTransport) -> anyhow::Result<String> {
    greet(transport).await?;
    let name = transport
        .recv()
        .await?
        .ok_or_else(|| anyhow::anyhow!("closed before sending a name"))?;
    debug!("< {}", name);
    Ok(name)
}

pub struct Server {
    listener: TcpListener,
    read_timeout: Option<Duration>,
}

impl Server {
    pub async fn bind<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            read_timeout: None,
        })
    }

    /// Fail a match when a player takes longer than `read_timeout` to answer.
    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Wait for the next connection that takes the greeting and sends a
    /// name. Connections that fail before that are dropped.
    async fn accept(&self, player: usize) -> anyhow::Result<(TcpTransport, SocketAddr, String)> {
        loop {
            let (stream, addr) = self.listener.accept().await?;
            info!("player {} from {}", player + 1, addr);
            let mut transport = match self.read_timeout {
                Some(limit) => TcpTransport::with_timeout(stream, limit),
                None => TcpTransport::new(stream),
            };
            match handshake(&mut transport).await {
                Ok(name) => return Ok((transport, addr, name)),
                Err(e) => warn!("dropping connection from {}: {}", addr, e),
            }
        }
    }

    /// Run `games` matches on `field`, one at a time.
    ///
    /// A match that fails after both names arrived (bad placement, protocol
    /// error, disconnection) is logged and counts as played. Only a failure
    /// to accept connections ends the run.
    pub async fn run(
        &self,
        games: usize,
        field: &Field,
        options: &SessionOptions,
    ) -> anyhow::Result<Tally> {
        let mut win_count = Tally::new();
        for game in 0..games {
            info!("waiting client players at {}", self.local_addr()?);
            let (t0, a0, n0) = self.accept(0).await?;
            let (t1, a1, n1) = self.accept(1).await?;
            let addrs = [a0, a1];
            let mut transports: Transports = [Box::new(t0), Box::new(t1)];

            match play_named_game(field, [n0, n1], &mut transports, options).await {
                Ok(summary) => {
                    if let Outcome::Winner(w) = summary.outcome {
                        let id = format!("{}@{}", summary.names[w], addrs[w].ip());
                        *win_count.entry(id).or_default() += 1;
                    }
                }
                Err(e) => error!("game {} aborted: {}", game + 1, e),
            }
            // Dropping the transports closes both connections.
        }
        Ok(win_count)
    }
}

/// Serve matches as configured and print the tally when more than one game
/// was played.
pub async fn server_main(config: &ServerConfig) -> anyhow::Result<Tally> {
    let field = config.field()?;
    debug!("field is\n{}", field.to_ascii());
    let server = Server::bind((config.host.as_str(), config.port))
        .await?
        .with_read_timeout(config.read_timeout());
    let tally = server.run(config.games, &field, &config.session_options()).await?;
    if config.games > 1 {
        for (name, wins) in &tally {
            println!("{} win {} time(s)", name, wins);
        }
    }
    Ok(tally)
}

/// Play one match in-process between two players over in-memory transports.
pub async fn play_local(
    field: &Field,
    players: [(Box<dyn Player>, SmallRng); 2],
    options: &SessionOptions,
) -> anyhow::Result<MatchSummary> {
    let [(p0, mut rng0), (p1, mut rng1)] = players;
    let (mut s0, c0) = InMemoryTransport::pair();
    let (mut s1, c1) = InMemoryTransport::pair();
    greet(&mut s0).await?;
    greet(&mut s1).await?;

    let field = field.clone();
    let options = *options;
    let server = async move {
        let mut transports: Transports = [Box::new(s0), Box::new(s1)];
        play_game(&field, &mut transports, &options).await
    };
    let node0 = async move {
        let mut node = PlayerNode::new(p0, Box::new(c0));
        node.run(&mut rng0).await
    };
    let node1 = async move {
        let mut node = PlayerNode::new(p1, Box::new(c1));
        node.run(&mut rng1).await
    };

    let (summary, r0, r1) = tokio::join!(server, node0, node1);
    let summary = summary?;
    r0?;
    r1?;
    Ok(summary)
}
