//! UDP transport for the partitioned channel

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

use crate::{ChannelError, ChannelResult};

const MAX_DATAGRAM: usize = 64 * 1024;

/// Sends payloads to the channel's partition addresses
pub struct UdpSender {
    socket: UdpSocket,
    partitions: Vec<SocketAddr>,
}

impl UdpSender {
    /// Open a sender for the given partition addresses (index = partition id).
    pub async fn connect(partitions: Vec<SocketAddr>) -> ChannelResult<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        Ok(Self { socket, partitions })
    }

    /// Send one message to `partition`, recording the round-trip duration.
    pub async fn send(&self, partition: u32, message: &str) -> ChannelResult<()> {
        let addr = self
            .partitions
            .get(partition as usize)
            .ok_or(ChannelError::UnknownPartition(partition))?;

        let started = Instant::now();
        self.socket.send_to(message.as_bytes(), addr).await?;
        debug!(
            partition,
            bytes = message.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "message sent"
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl wxfill_core::MessageSink for UdpSender {
    async fn send(&mut self, partition: u32, message: &str) -> anyhow::Result<()> {
        UdpSender::send(self, partition, message).await?;
        Ok(())
    }
}

/// Drains one partition with a bounded idle window
pub struct UdpReceiver {
    socket: UdpSocket,
    partition: u32,
}

impl UdpReceiver {
    pub async fn bind(addr: SocketAddr, partition: u32) -> ChannelResult<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self { socket, partition })
    }

    /// Actual bound address; useful when binding to port 0.
    pub fn local_addr(&self) -> ChannelResult<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn partition(&self) -> u32 {
        self.partition
    }

    /// Next message, or `None` once nothing has arrived within
    /// `idle_timeout` of the previous message (or of the start). A steady
    /// trickle keeps the drain alive indefinitely.
    pub async fn recv(&self, idle_timeout: Duration) -> ChannelResult<Option<String>> {
        let mut buf = vec![0u8; MAX_DATAGRAM];
        match timeout(idle_timeout, self.socket.recv_from(&mut buf)).await {
            Err(_elapsed) => Ok(None),
            Ok(received) => {
                let (len, _peer) = received?;
                Ok(Some(String::from_utf8_lossy(&buf[..len]).into_owned()))
            }
        }
    }
}

#[async_trait::async_trait]
impl wxfill_core::MessageStream for UdpReceiver {
    async fn next_message(&mut self, idle_timeout: Duration) -> anyhow::Result<Option<String>> {
        Ok(self.recv(idle_timeout).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn ephemeral_receiver(partition: u32) -> UdpReceiver {
        UdpReceiver::bind("127.0.0.1:0".parse().unwrap(), partition)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn messages_route_to_their_partition() {
        let rx0 = ephemeral_receiver(0).await;
        let rx1 = ephemeral_receiver(1).await;
        let sender = UdpSender::connect(vec![
            rx0.local_addr().unwrap(),
            rx1.local_addr().unwrap(),
        ])
        .await
        .unwrap();

        sender.send(0, "even").await.unwrap();
        sender.send(1, "odd").await.unwrap();

        let got0 = rx0.recv(Duration::from_secs(1)).await.unwrap();
        let got1 = rx1.recv(Duration::from_secs(1)).await.unwrap();
        assert_eq!(got0.as_deref(), Some("even"));
        assert_eq!(got1.as_deref(), Some("odd"));
    }

    #[tokio::test]
    async fn idle_receiver_returns_none_after_timeout() {
        let rx = ephemeral_receiver(0).await;

        let got = rx.recv(Duration::from_millis(50)).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn unknown_partition_is_rejected() {
        let rx = ephemeral_receiver(0).await;
        let sender = UdpSender::connect(vec![rx.local_addr().unwrap()])
            .await
            .unwrap();

        let err = sender.send(5, "lost").await.unwrap_err();
        assert!(matches!(err, ChannelError::UnknownPartition(5)));
    }
}
