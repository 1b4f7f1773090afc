//! Standalone channel: no host at all.
//!
//! Outbound messages are logged and dropped. Nothing ever arrives inbound,
//! so a run waiting for instance data never starts.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::info;
use wordweave_core::channel::MessageChannel;
use wordweave_core::error::ChannelError;
use wordweave_core::protocol::{ChildMessage, HostMessage};

pub struct StandaloneChannel {
    // Kept alive so subscriptions pend instead of closing.
    inbound: broadcast::Sender<HostMessage>,
}

impl StandaloneChannel {
    pub fn new() -> Self {
        let (inbound, _) = broadcast::channel(1);
        Self { inbound }
    }
}

impl Default for StandaloneChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageChannel for StandaloneChannel {
    fn name(&self) -> &str {
        "standalone"
    }

    async fn send(&self, message: ChildMessage) -> Result<(), ChannelError> {
        let payload = message.to_json()?;
        info!(message = message.kind(), %payload, "No host, message not delivered");
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<HostMessage> {
        self.inbound.subscribe()
    }

    fn is_standalone(&self) -> bool {
        true
    }
}
