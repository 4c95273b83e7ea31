//! Redis reachability
//!
//! Opens a multiplexed connection and issues a single `PING`. The connection
//! handle is dropped before `check` returns, which stops its driver task and
//! closes the socket.

use async_trait::async_trait;

use super::{Probe, ProbeError, ProbeResult, Reachable, Service};
use crate::config::Endpoint;

pub struct RedisProbe {
    endpoint: Endpoint,
}

impl RedisProbe {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    fn url(&self) -> String {
        format!("redis://{}/", self.endpoint)
    }
}

#[async_trait]
impl Probe for RedisProbe {
    fn service(&self) -> Service {
        Service::CachePrimary
    }

    fn target(&self) -> String {
        self.endpoint.to_string()
    }

    async fn check(&self) -> ProbeResult<Reachable> {
        let client = redis::Client::open(self.url())
            .map_err(|e| ProbeError::Unavailable(format!("redis for {}: {}", self.target(), e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| ProbeError::connect(self.target(), e))?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| ProbeError::protocol(self.target(), &e.to_string()))?;

        drop(conn);

        if pong == "PONG" {
            Ok(Reachable)
        } else {
            Err(ProbeError::protocol(self.target(), &pong))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::testing::{closed_endpoint, endpoint_for};
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Read one RESP array command; `None` once the client hangs up.
    async fn read_command<R>(reader: &mut R) -> Option<Vec<String>>
    where
        R: AsyncBufReadExt + Unpin,
    {
        let mut line = String::new();
        if reader.read_line(&mut line).await.ok()? == 0 {
            return None;
        }
        let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

        let mut args = Vec::with_capacity(count);
        for _ in 0..count {
            line.clear();
            reader.read_line(&mut line).await.ok()?; // $len
            line.clear();
            reader.read_line(&mut line).await.ok()?;
            args.push(line.trim_end().to_string());
        }
        Some(args)
    }

    /// Single-connection Redis stand-in. PING gets `ping_reply`, anything
    /// else `+OK`. Reports whether the client closed the socket.
    async fn fake_redis(ping_reply: &'static [u8]) -> (Endpoint, oneshot::Receiver<bool>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = endpoint_for(listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let (read_half, mut write_half) = socket.into_split();
            let mut reader = BufReader::new(read_half);

            while let Some(args) = read_command(&mut reader).await {
                let reply: &[u8] = match args.first() {
                    Some(cmd) if cmd.eq_ignore_ascii_case("PING") => ping_reply,
                    _ => b"+OK\r\n",
                };
                if write_half.write_all(reply).await.is_err() {
                    break;
                }
            }
            let _ = tx.send(true);
        });

        (endpoint, rx)
    }

    #[tokio::test]
    async fn test_pong_is_reachable_and_released() {
        let (endpoint, closed) = fake_redis(b"+PONG\r\n").await;
        let probe = RedisProbe::new(endpoint);

        assert_eq!(probe.check().await.unwrap(), Reachable);

        let released = tokio::time::timeout(Duration::from_secs(2), closed)
            .await
            .unwrap()
            .unwrap();
        assert!(released);
    }

    #[tokio::test]
    async fn test_error_reply_is_unreachable() {
        let (endpoint, _closed) = fake_redis(b"-NOAUTH Authentication required.\r\n").await;
        let probe = RedisProbe::new(endpoint);
        assert_eq!(probe.check().await.unwrap_err().kind(), "protocol");
    }

    #[tokio::test]
    async fn test_refused_is_unreachable() {
        let probe = RedisProbe::new(closed_endpoint().await);
        let err = probe.check().await.unwrap_err();
        assert_eq!(err.kind(), "connect");
    }

    #[tokio::test]
    async fn test_unusable_address_is_unavailable() {
        let probe = RedisProbe::new(Endpoint::new("[::1", 6379));
        let err = probe.check().await.unwrap_err();
        assert_eq!(err.kind(), "unavailable");
    }
}
