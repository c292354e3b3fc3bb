use super::{CallOptions, CepcChannel, CepcSend};
use crate::constants::{CEPC_ERROR_CODE_INTERNAL, CEPC_LOG_NAME};
use crate::error::CepcError;
use crate::packet::{Packet, PacketBody, PacketCodec};
use crate::pending::PendingCallCancel;
use crate::procedure::CepcProcedure;
use crate::utils::{generate_call_key, increment_call_index, now};
use futures::future::{self, Either};
use serde_json::Value;
use tokio::sync::oneshot;

/// Removes the pending entry when the call finishes or is dropped.
struct PendingCallGuard(PendingCallCancel);

impl Drop for PendingCallGuard {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

impl CepcChannel {
    /// Calls the procedure `name` on the peer.
    ///
    /// The call packet is handed to `send`; the response must come back
    /// through [`CepcChannel::handle`] on this same channel. The pending
    /// entry is registered before `send` runs, so a reply delivered while
    /// `send` is still executing is matched correctly.
    ///
    /// Settles exactly once with one of:
    /// - the peer's response data,
    /// - the peer's error (visible code and message, or `CEPC_INTERNAL`),
    /// - `CEPC_TIMEOUT` when `options.timeout` elapses first,
    /// - `CEPC_SEND_FAILURE` when `send` fails.
    ///
    /// A call abandoned by [`PendingCallRegistry::reset`] never settles.
    /// Arming a timeout requires a Tokio runtime.
    ///
    /// [`PendingCallRegistry::reset`]: crate::pending::PendingCallRegistry::reset
    pub async fn call<S>(
        &self,
        name: &str,
        request_data: Value,
        send: &S,
        options: CallOptions,
    ) -> Result<Value, CepcError>
    where
        S: CepcSend + ?Sized,
    {
        let index = increment_call_index();
        let key = generate_call_key(index);

        let packet = Packet {
            name: name.to_string(),
            key: key.clone(),
            index,
            timestamp: now(),
            body: PacketBody::Call { request_data },
        };

        let text = PacketCodec::encode(&packet).map_err(|err| {
            tracing::error!(
                procedure = name,
                "[{CEPC_LOG_NAME}] failed to encode the request of `{name}`: {err}"
            );
            CepcError::new(CEPC_ERROR_CODE_INTERNAL, err.to_string())
        })?;

        let (on_settle, mut settled) = oneshot::channel();
        let guard = PendingCallGuard(self.pending_calls.register(name, &key, on_settle));

        if let Some(timeout) = options.timeout {
            self.pending_calls.arm_timeout(&guard.0, timeout);
        }

        tracing::debug!(procedure = name, key = %key, index, "[{CEPC_LOG_NAME}] calling `{name}`");

        // A send that only completes once the peer has answered (an
        // in-process loopback) must not hold the call past its settlement.
        let settled_early = {
            let sent = send.send(text);
            match future::select(sent, &mut settled).await {
                Either::Left((Ok(()), _)) => None,
                // The reply may have been delivered before `send` reported
                // its failure; an arrived settlement takes precedence.
                Either::Left((Err(err), settled)) => match settled.try_recv() {
                    Ok(outcome) => Some(Ok(outcome)),
                    Err(_) => {
                        tracing::error!(
                            procedure = name,
                            key = %key,
                            "[{CEPC_LOG_NAME}] failed to send the request of `{name}`: {err}"
                        );
                        // Dropping the guard removes the entry and its timer.
                        drop(guard);
                        return Err(CepcError::send_failure(err.to_string()));
                    }
                },
                Either::Right((settlement, _)) => Some(settlement),
            }
        };

        let settlement = match settled_early {
            Some(settlement) => settlement,
            None => settled.await,
        };

        match settlement {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::debug!(
                    procedure = name,
                    key = %key,
                    "[{CEPC_LOG_NAME}] request `{name}:{key}` was abandoned"
                );
                drop(guard);
                std::future::pending().await
            }
        }
    }

    /// Calls a typed procedure, (de)serializing through its definition.
    ///
    /// Local (de)serialization failures are reported as `CEPC_INTERNAL`
    /// with the serde error as message.
    pub async fn call_typed<P, S>(
        &self,
        request: P::Request,
        send: &S,
        options: CallOptions,
    ) -> Result<P::Response, CepcError>
    where
        P: CepcProcedure,
        S: CepcSend + ?Sized,
    {
        let request_data = P::encode_request(&request)
            .map_err(|err| CepcError::new(CEPC_ERROR_CODE_INTERNAL, err.to_string()))?;

        let response_data = self.call(P::NAME, request_data, send, options).await?;

        P::decode_response(response_data).map_err(|err| {
            tracing::error!(
                procedure = P::NAME,
                "[{CEPC_LOG_NAME}] failed to decode the response of `{}`: {err}",
                P::NAME
            );
            CepcError::new(CEPC_ERROR_CODE_INTERNAL, err.to_string())
        })
    }
}
