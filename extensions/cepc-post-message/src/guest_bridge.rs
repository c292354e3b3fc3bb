use crate::{PostMessageTarget, TargetUnavailable, call_procedure};
use cepc::constants::CEPC_LOG_NAME;
use cepc::{CallOptions, CepcChannel, CepcError, SendError, SyncSend};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

/// Guest side of an embedded web view.
///
/// The host is reached through a [`PostMessageTarget`] installed with
/// [`start`](Self::start). Inbound text from the host goes to
/// [`handle_guest`](Self::handle_guest), whose replies are posted back
/// through the same target.
pub struct GuestBridge {
    channel: CepcChannel,
    host: RwLock<Option<Arc<dyn PostMessageTarget>>>,
}

impl GuestBridge {
    pub fn new(channel: CepcChannel) -> Self {
        Self {
            channel,
            host: RwLock::new(None),
        }
    }

    pub fn channel(&self) -> &CepcChannel {
        &self.channel
    }

    /// Installs the host target, replacing any previous one.
    pub fn start(&self, host: Arc<dyn PostMessageTarget>) {
        if self.host.write().replace(host).is_some() {
            tracing::warn!("[{CEPC_LOG_NAME}] guest bridge restarted with a new host target");
        } else {
            tracing::debug!("[{CEPC_LOG_NAME}] guest bridge started");
        }
    }

    /// Removes the host target. Calls issued afterwards fail with
    /// `CEPC_UNINITIALIZED`; pending calls are left untouched.
    pub fn stop(&self) {
        if self.host.write().take().is_none() {
            tracing::warn!("[{CEPC_LOG_NAME}] guest bridge is not running");
        }
    }

    pub fn is_started(&self) -> bool {
        self.host.read().is_some()
    }

    /// Calls a procedure registered on the host.
    pub async fn call_host(
        &self,
        name: &str,
        request_data: Value,
        options: CallOptions,
    ) -> Result<Value, CepcError> {
        let host = self.host.read().clone();
        call_procedure(&self.channel, host.as_deref(), name, request_data, options).await
    }

    /// Processes one text received from the host.
    ///
    /// The reply target is looked up when the reply is ready, so a bridge
    /// stopped while a procedure runs drops the reply (the failure is logged).
    pub async fn handle_guest(&self, payload: &str) {
        let post = SyncSend(|message: String| -> Result<(), SendError> {
            let host = self.host.read().clone();
            match host {
                Some(host) => host.post_message(message),
                None => Err(TargetUnavailable.into()),
            }
        });
        self.channel.handle(payload, &post).await;
    }
}
