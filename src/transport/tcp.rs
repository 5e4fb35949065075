use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::transport::Transport;

/// Longest line accepted, newline excluded. Reads stop once it is exceeded.
const MAX_LINE_LEN: usize = 64 * 1024;

pub struct TcpTransport {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    peer: Option<SocketAddr>,
    read_timeout: Option<Duration>,
    max_line_len: usize,
}

impl TcpTransport {
    /// Wrap a connected stream. Reads wait for the peer indefinitely.
    pub fn new(stream: TcpStream) -> Self {
        let peer = stream.peer_addr().ok();
        let (read, write) = stream.into_split();
        Self {
            reader: BufReader::new(read),
            writer: write,
            peer,
            read_timeout: None,
            max_line_len: MAX_LINE_LEN,
        }
    }

    /// Wrap a connected stream, failing any read that takes longer than `read_timeout`.
    pub fn with_timeout(stream: TcpStream, read_timeout: Duration) -> Self {
        Self {
            read_timeout: Some(read_timeout),
            ..Self::new(stream)
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    /// Address of the remote end, when the OS could report it.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }

    async fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut buf = Vec::new();
        let n = (&mut self.reader)
            .take(self.max_line_len as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
                _ => anyhow::anyhow!("Read error: {}", e),
            })?;
        if n == 0 {
            return Ok(None);
        }
        if buf.last() != Some(&b'\n') && buf.len() > self.max_line_len {
            return Err(anyhow::anyhow!(
                "Line too long: more than {} bytes without a newline",
                self.max_line_len
            ));
        }
        let mut line =
            String::from_utf8(buf).map_err(|_| anyhow::anyhow!("Line is not valid UTF-8"))?;
        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        let mut data = Vec::with_capacity(line.len() + 1);
        data.extend_from_slice(line.as_bytes());
        data.push(b'\n');
        self.writer.write_all(&data).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::BrokenPipe
                || e.kind() == std::io::ErrorKind::ConnectionReset
            {
                anyhow::anyhow!("Connection closed by peer")
            } else {
                anyhow::anyhow!("Write error: {}", e)
            }
        })?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        match self.read_timeout {
            Some(limit) => timeout(limit, self.read_line())
                .await
                .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", limit))?,
            None => self.read_line().await,
        }
    }
}
