//! In-process channel pair.
//!
//! [`MemoryChannel`] is the exercise side, [`HostHandle`] plays the host.
//! Used by tests and by the `simulate` command.

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tracing::debug;
use wordweave_core::channel::MessageChannel;
use wordweave_core::error::ChannelError;
use wordweave_core::protocol::{ChildMessage, HostMessage, JumpRequest};

const INBOUND_CAPACITY: usize = 64;

pub struct MemoryChannel {
    inbound: broadcast::Sender<HostMessage>,
    outbound: mpsc::UnboundedSender<ChildMessage>,
}

/// The host end of a [`MemoryChannel`].
pub struct HostHandle {
    inbound: broadcast::Sender<HostMessage>,
    outbound: mpsc::UnboundedReceiver<ChildMessage>,
}

impl MemoryChannel {
    pub fn pair() -> (MemoryChannel, HostHandle) {
        let (inbound, _) = broadcast::channel(INBOUND_CAPACITY);
        let (tx, rx) = mpsc::unbounded_channel();
        (
            MemoryChannel {
                inbound: inbound.clone(),
                outbound: tx,
            },
            HostHandle {
                inbound,
                outbound: rx,
            },
        )
    }
}

#[async_trait]
impl MessageChannel for MemoryChannel {
    fn name(&self) -> &str {
        "memory"
    }

    async fn send(&self, message: ChildMessage) -> Result<(), ChannelError> {
        debug!(message = message.kind(), "Child -> host");
        self.outbound
            .send(message)
            .map_err(|_| ChannelError::Closed("host handle dropped".into()))
    }

    fn subscribe(&self) -> broadcast::Receiver<HostMessage> {
        self.inbound.subscribe()
    }
}

impl HostHandle {
    /// Deliver a message to every current listener. With nobody listening
    /// the message is dropped, as a window message with no handler would be.
    pub fn post(&self, message: HostMessage) {
        let kind = message.kind();
        if self.inbound.send(message).is_err() {
            debug!(message = kind, "No listener, host message dropped");
        }
    }

    /// Advance, as if the host's check button was pressed.
    pub fn trigger_check(&self) {
        self.post(HostMessage::Check);
    }

    pub fn jump(&self, current: usize) {
        self.post(HostMessage::Progress(JumpRequest { current }));
    }

    /// Number of live subscriptions on the exercise side.
    pub fn listeners(&self) -> usize {
        self.inbound.receiver_count()
    }

    /// Next message from the exercise, or `None` once it is gone.
    pub async fn next(&mut self) -> Option<ChildMessage> {
        self.outbound.recv().await
    }

    /// Skip messages until `pick` accepts one.
    pub async fn next_where<T, F>(&mut self, mut pick: F) -> Option<T>
    where
        F: FnMut(ChildMessage) -> Option<T>,
    {
        while let Some(message) = self.outbound.recv().await {
            if let Some(value) = pick(message) {
                return Some(value);
            }
        }
        None
    }

    /// Drain whatever the exercise has already sent.
    pub fn drain(&mut self) -> Vec<ChildMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.outbound.try_recv() {
            messages.push(message);
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordweave_core::protocol::ProgressReport;

    #[tokio::test]
    async fn child_messages_reach_the_host() {
        let (channel, mut host) = MemoryChannel::pair();
        channel.send(ChildMessage::Load).await.unwrap();
        channel.send(ChildMessage::check(true)).await.unwrap();

        assert_eq!(host.next().await, Some(ChildMessage::Load));
        assert_eq!(host.next().await, Some(ChildMessage::check(true)));
    }

    #[tokio::test]
    async fn every_subscription_sees_host_messages() {
        let (channel, host) = MemoryChannel::pair();
        let mut a = channel.subscribe();
        let mut b = channel.subscribe();
        assert_eq!(host.listeners(), 2);

        host.jump(3);
        assert_eq!(
            a.recv().await.unwrap(),
            HostMessage::Progress(JumpRequest { current: 3 })
        );
        assert_eq!(
            b.recv().await.unwrap(),
            HostMessage::Progress(JumpRequest { current: 3 })
        );
    }

    #[tokio::test]
    async fn posts_without_listener_are_dropped() {
        let (channel, host) = MemoryChannel::pair();
        host.trigger_check();

        let mut rx = channel.subscribe();
        host.jump(1);
        assert_eq!(
            rx.recv().await.unwrap(),
            HostMessage::Progress(JumpRequest { current: 1 })
        );
    }

    #[tokio::test]
    async fn dropped_subscription_stops_listening() {
        let (channel, host) = MemoryChannel::pair();
        let rx = channel.subscribe();
        assert_eq!(host.listeners(), 1);
        drop(rx);
        assert_eq!(host.listeners(), 0);
    }

    #[tokio::test]
    async fn next_where_skips_other_messages() {
        let (channel, mut host) = MemoryChannel::pair();
        channel.send(ChildMessage::check(false)).await.unwrap();
        channel
            .send(ChildMessage::Progress(ProgressReport {
                available: 2,
                current: 2,
                total: 4,
                replay: None,
            }))
            .await
            .unwrap();

        let current = host
            .next_where(|m| match m {
                ChildMessage::Progress(p) => Some(p.current),
                _ => None,
            })
            .await;
        assert_eq!(current, Some(2));
    }

    #[tokio::test]
    async fn send_fails_once_host_is_gone() {
        let (channel, host) = MemoryChannel::pair();
        drop(host);
        let err = channel.send(ChildMessage::Load).await.unwrap_err();
        assert!(matches!(err, ChannelError::Closed(_)));
    }
}
