use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::task::yield_now;

use crate::transport::Transport;

type Queue = Arc<Mutex<VecDeque<String>>>;

/// One end of an in-process line channel, used for local games and tests.
pub struct InMemoryTransport {
    recv_queue: Queue,
    send_queue: Queue,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1 = Arc::new(Mutex::new(VecDeque::new()));
        let q2 = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
            },
        )
    }
}

fn lock(queue: &Queue) -> anyhow::Result<std::sync::MutexGuard<'_, VecDeque<String>>> {
    queue
        .lock()
        .map_err(|_| anyhow::anyhow!("Channel poisoned"))
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        if Arc::strong_count(&self.send_queue) == 1 {
            return Err(anyhow::anyhow!("Connection closed by peer"));
        }
        lock(&self.send_queue)?.push_back(line.to_string());
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        loop {
            let next = lock(&self.recv_queue)?.pop_front();
            if let Some(line) = next {
                return Ok(Some(line));
            }
            if Arc::strong_count(&self.recv_queue) == 1 {
                // Peer is gone; drain anything it sent before closing.
                let last = lock(&self.recv_queue)?.pop_front();
                return Ok(last);
            }
            yield_now().await;
        }
    }
}
