use super::{CepcChannel, CepcSend};
use crate::constants::{CEPC_ERROR_CODE_INTERNAL, CEPC_ERROR_CODE_UNDEFINED, CEPC_LOG_NAME};
use crate::error::{ProcedureFailure, WireError, from_wire_error, to_wire_error};
use crate::packet::{Packet, PacketBody, PacketCodec, PacketDecodeError};
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;

impl CepcChannel {
    /// Processes one inbound text.
    ///
    /// Calls are answered through `send`; results and errors settle the
    /// matching pending call. Nothing that arrives here is treated as a
    /// failure of `handle` itself: unknown procedures are answered with
    /// `CEPC_UNDEFINED`, everything else that cannot be used is logged.
    pub async fn handle<S>(&self, payload: &str, send: &S)
    where
        S: CepcSend + ?Sized,
    {
        self.handle_with_fallback(payload, send, None).await
    }

    /// Like [`handle`](Self::handle), but text that does not belong to this
    /// protocol is passed to `fallback` instead of being logged, so a shared
    /// channel can forward it elsewhere.
    pub async fn handle_with_fallback<S>(
        &self,
        payload: &str,
        send: &S,
        fallback: Option<&(dyn Fn(&str) + Sync)>,
    ) where
        S: CepcSend + ?Sized,
    {
        let mut packet = match PacketCodec::decode(payload) {
            Ok(packet) => packet,
            Err(PacketDecodeError::Foreign) => {
                match fallback {
                    Some(fallback) => fallback(payload),
                    None => tracing::error!(
                        "[{CEPC_LOG_NAME}] payload string `{payload}` is not in a valid format"
                    ),
                }
                return;
            }
            Err(PacketDecodeError::Malformed(reason)) => {
                tracing::error!(
                    reason = %reason,
                    "[{CEPC_LOG_NAME}] payload string `{payload}` is not in a valid format"
                );
                return;
            }
        };

        match &mut packet.body {
            PacketBody::Call { request_data } => {
                let request_data = std::mem::take(request_data);
                let reply = self.answer_call(&packet, request_data).await;
                self.send_reply(&packet, &reply, send).await;
            }
            PacketBody::Result { response_data } => {
                let response_data = std::mem::take(response_data);
                self.pending_calls
                    .settle(&packet.name, &packet.key, Ok(response_data));
            }
            PacketBody::Error { code, message } => {
                let err = from_wire_error(WireError {
                    code: std::mem::take(code),
                    message: message.take(),
                });
                self.pending_calls.settle(&packet.name, &packet.key, Err(err));
            }
        }
    }

    async fn answer_call(&self, call: &Packet, request_data: Value) -> Packet {
        let name = call.name.as_str();

        let Some(handler) = self.procedures.lookup(name) else {
            tracing::error!(
                procedure = name,
                "[{CEPC_LOG_NAME}] procedure `{name}` is not registered"
            );
            return call.to_error(CEPC_ERROR_CODE_UNDEFINED.to_string(), None);
        };

        tracing::debug!(
            procedure = name,
            key = %call.key,
            index = call.index,
            "[{CEPC_LOG_NAME}] invoking `{name}`"
        );

        // The handler is invoked inside the guarded future so a panic raised
        // before its first await is caught as well.
        let invocation = async move { handler(request_data).await };
        let outcome = match AssertUnwindSafe(invocation).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => Err(ProcedureFailure::opaque(format!(
                "handler panicked: {}",
                panic_detail(panic.as_ref())
            ))),
        };

        match outcome {
            Ok(response_data) => call.to_result(response_data),
            Err(failure) => {
                let wire = to_wire_error(name, failure);
                call.to_error(wire.code, wire.message)
            }
        }
    }

    async fn send_reply<S>(&self, call: &Packet, reply: &Packet, send: &S)
    where
        S: CepcSend + ?Sized,
    {
        let text = match PacketCodec::encode(reply) {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(
                    procedure = %call.name,
                    "[{CEPC_LOG_NAME}] failed to encode the reply of `{}`: {err}",
                    call.name
                );
                let fallback = call.to_error(CEPC_ERROR_CODE_INTERNAL.to_string(), None);
                match PacketCodec::encode(&fallback) {
                    Ok(text) => text,
                    Err(_) => return,
                }
            }
        };

        if let Err(err) = send.send(text).await {
            tracing::error!(
                procedure = %call.name,
                key = %call.key,
                "[{CEPC_LOG_NAME}] cannot send the reply of `{}:{}`: {err}",
                call.name,
                call.key
            );
        }
    }
}

fn panic_detail(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
