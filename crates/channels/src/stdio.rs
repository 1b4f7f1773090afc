//! Stdio channel: one JSON message per line.
//!
//! Host messages are read from the input stream, child messages written to
//! the output stream. Logs go to stderr so stdout stays a clean protocol
//! stream for `wordweave serve`.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use wordweave_core::channel::MessageChannel;
use wordweave_core::error::ChannelError;
use wordweave_core::protocol::{ChildMessage, HostMessage};

const INBOUND_CAPACITY: usize = 64;

pub struct StdioChannel<W> {
    writer: Mutex<W>,
    inbound: broadcast::Sender<HostMessage>,
}

impl StdioChannel<tokio::io::Stdout> {
    /// Channel over the process's own stdin/stdout.
    pub fn stdio() -> (Self, JoinHandle<()>) {
        Self::spawn(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<W> StdioChannel<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Start reading host messages from `reader` in the background.
    ///
    /// The returned handle finishes when the input reaches EOF or fails.
    pub fn spawn<R>(reader: R, writer: W) -> (Self, JoinHandle<()>)
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (inbound, _) = broadcast::channel(INBOUND_CAPACITY);
        let tx = inbound.clone();

        let reader_task = tokio::spawn(async move {
            let mut lines = BufReader::new(reader).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match HostMessage::parse(line) {
                            Ok(message) => {
                                let kind = message.kind();
                                if tx.send(message).is_err() {
                                    debug!(message = kind, "No listener, host message dropped");
                                }
                            }
                            Err(e) => warn!(error = %e, "Ignoring malformed host message"),
                        }
                    }
                    Ok(None) => {
                        info!("Host input closed");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Host input failed");
                        break;
                    }
                }
            }
        });

        (
            Self {
                writer: Mutex::new(writer),
                inbound,
            },
            reader_task,
        )
    }
}

#[async_trait]
impl<W> MessageChannel for StdioChannel<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn name(&self) -> &str {
        "stdio"
    }

    async fn send(&self, message: ChildMessage) -> Result<(), ChannelError> {
        let mut line = message.to_json()?;
        line.push('\n');

        let mut writer = self.writer.lock().await;
        let delivery = async {
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await
        };
        delivery.await.map_err(|e| ChannelError::DeliveryFailed {
            channel: "stdio".into(),
            reason: e.to_string(),
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<HostMessage> {
        self.inbound.subscribe()
    }
}
