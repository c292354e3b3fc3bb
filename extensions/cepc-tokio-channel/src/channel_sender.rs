use cepc::{CepcSend, SendError};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// The peer endpoint has been closed and no longer receives packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("transport is closed")]
pub struct TransportClosed;

/// Send half of a [`ChannelTransport`](crate::ChannelTransport).
#[derive(Clone)]
pub struct ChannelSender {
    pub(crate) tx: UnboundedSender<String>,
}

impl ChannelSender {
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[async_trait::async_trait]
impl CepcSend for ChannelSender {
    async fn send(&self, text: String) -> Result<(), SendError> {
        self.tx.send(text).map_err(|_| TransportClosed)?;
        Ok(())
    }
}
