use crate::ChannelSender;
use cepc::constants::CEPC_LOG_NAME;
use cepc::{CallOptions, CepcChannel, CepcError, CepcProcedure};
use serde_json::Value;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::task::JoinHandle;

/// One end of an in-process connection between two [`CepcChannel`]s.
///
/// Packets sent from one end are delivered to the other end's channel. The
/// receive loop handles every inbound packet in its own task, so a slow
/// procedure does not hold up responses to other calls.
pub struct ChannelTransport {
    channel: CepcChannel,
    sender: ChannelSender,
    receive_task: JoinHandle<()>,
}

impl ChannelTransport {
    /// Connects two channels. Each returned endpoint calls through its own
    /// channel and answers the peer's calls from it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn pair(local: CepcChannel, remote: CepcChannel) -> (ChannelTransport, ChannelTransport) {
        let (local_tx, local_rx) = unbounded_channel::<String>();
        let (remote_tx, remote_rx) = unbounded_channel::<String>();

        let local_end = Self::new(local, ChannelSender { tx: remote_tx }, local_rx);
        let remote_end = Self::new(remote, ChannelSender { tx: local_tx }, remote_rx);

        (local_end, remote_end)
    }

    /// Builds an endpoint from an existing channel pair: `sender` reaches the
    /// peer and `rx` yields the peer's packets.
    pub fn new(
        channel: CepcChannel,
        sender: ChannelSender,
        mut rx: UnboundedReceiver<String>,
    ) -> Self {
        let receive_channel = channel.clone();
        let reply_sender = sender.clone();

        // Receive loop
        let receive_task = tokio::spawn(async move {
            while let Some(text) = rx.recv().await {
                let channel = receive_channel.clone();
                let reply_sender = reply_sender.clone();
                tokio::spawn(async move {
                    channel.handle(&text, &reply_sender).await;
                });
            }
            tracing::debug!("[{CEPC_LOG_NAME}] channel transport receive loop ended");
        });

        Self {
            channel,
            sender,
            receive_task,
        }
    }

    pub fn channel(&self) -> &CepcChannel {
        &self.channel
    }

    pub fn sender(&self) -> ChannelSender {
        self.sender.clone()
    }

    pub async fn call(
        &self,
        name: &str,
        request_data: Value,
        options: CallOptions,
    ) -> Result<Value, CepcError> {
        self.channel
            .call(name, request_data, &self.sender, options)
            .await
    }

    pub async fn call_typed<P>(
        &self,
        request: P::Request,
        options: CallOptions,
    ) -> Result<P::Response, CepcError>
    where
        P: CepcProcedure,
    {
        self.channel
            .call_typed::<P, _>(request, &self.sender, options)
            .await
    }

    /// Stops receiving. Once this returns, the peer's sends fail.
    pub async fn close(mut self) {
        self.receive_task.abort();
        let _ = (&mut self.receive_task).await;
    }
}

impl Drop for ChannelTransport {
    fn drop(&mut self) {
        self.receive_task.abort();
    }
}
