//! MessageChannel trait — the abstraction over the child ⇄ host boundary.
//!
//! In a browser this is `window.parent.postMessage` plus a `message`
//! listener. Here it is a narrow trait: send a [`ChildMessage`], subscribe to
//! [`HostMessage`]s. Every subscription sees every inbound message sent
//! after it was created, and dropping the receiver removes the listener.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::warn;

use crate::error::ChannelError;
use crate::protocol::{ChildMessage, HostMessage};

#[async_trait]
pub trait MessageChannel: Send + Sync {
    /// Human-readable transport name (e.g., "memory", "stdio").
    fn name(&self) -> &str;

    /// Post a message to the host.
    async fn send(&self, message: ChildMessage) -> Result<(), ChannelError>;

    /// Start listening for host messages.
    fn subscribe(&self) -> broadcast::Receiver<HostMessage>;

    /// True when there is no host at all (top-level debug mode).
    fn is_standalone(&self) -> bool {
        false
    }
}

/// Wait on a subscription until `pick` accepts a message.
///
/// Messages `pick` rejects are skipped. A lagging receiver logs and keeps
/// going; a closed channel is an error.
pub async fn wait_for<T, F>(
    rx: &mut broadcast::Receiver<HostMessage>,
    mut pick: F,
) -> Result<T, ChannelError>
where
    F: FnMut(HostMessage) -> Option<T>,
{
    loop {
        match rx.recv().await {
            Ok(message) => {
                if let Some(value) = pick(message) {
                    return Ok(value);
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Host message listener lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                return Err(ChannelError::Closed("host side dropped".into()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_for_skips_unwanted_messages() {
        let (tx, mut rx) = broadcast::channel(8);
        tx.send(HostMessage::Check).unwrap();
        tx.send(HostMessage::Progress(crate::protocol::JumpRequest { current: 4 }))
            .unwrap();

        let current = wait_for(&mut rx, |m| match m {
            HostMessage::Progress(jump) => Some(jump.current),
            _ => None,
        })
        .await
        .unwrap();
        assert_eq!(current, 4);
    }

    #[tokio::test]
    async fn wait_for_reports_closed_channel() {
        let (tx, mut rx) = broadcast::channel::<HostMessage>(1);
        drop(tx);
        let err = wait_for(&mut rx, |_| Some(())).await.unwrap_err();
        assert!(matches!(err, ChannelError::Closed(_)));
    }
}
