/// A duplex channel carrying newline-terminated text lines.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one line. The newline is appended by the transport.
    async fn send(&mut self, line: &str) -> anyhow::Result<()>;

    /// Receive one line with its line terminator stripped, or `None` once the
    /// peer has closed the connection.
    async fn recv(&mut self) -> anyhow::Result<Option<String>>;
}

pub mod in_memory;
pub mod tcp;
