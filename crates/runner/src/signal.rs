//! Host signals the run loop waits on.
//!
//! Each signal owns its own subscription. Dropping the signal removes the
//! listener, so a signal that lost a race cannot resolve later.

use tokio::sync::broadcast;
use wordweave_core::channel::{wait_for, MessageChannel};
use wordweave_core::error::ChannelError;
use wordweave_core::protocol::HostMessage;

/// How a wait on the active item ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Host `check`: go on to the next item.
    Advance,
    /// Host `progress`: go to this item (1-based).
    Jump(usize),
}

/// Resolves on the host's `check`.
pub struct AdvanceSignal {
    rx: broadcast::Receiver<HostMessage>,
}

impl AdvanceSignal {
    pub fn subscribe(channel: &dyn MessageChannel) -> Self {
        Self {
            rx: channel.subscribe(),
        }
    }

    pub async fn wait(&mut self) -> Result<(), ChannelError> {
        wait_for(&mut self.rx, |m| matches!(m, HostMessage::Check).then_some(())).await
    }
}

/// Resolves on the host's `progress` with the requested index.
pub struct JumpSignal {
    rx: broadcast::Receiver<HostMessage>,
}

impl JumpSignal {
    pub fn subscribe(channel: &dyn MessageChannel) -> Self {
        Self {
            rx: channel.subscribe(),
        }
    }

    pub async fn wait(&mut self) -> Result<usize, ChannelError> {
        wait_for(&mut self.rx, |m| match m {
            HostMessage::Progress(jump) => Some(jump.current),
            _ => None,
        })
        .await
    }
}
