use crate::error::ProcedureFailure;
use crate::pending::PendingCallRegistry;
use crate::procedure::{CepcProcedure, ProcedureRegistry, ProcedureRegistryError, ProcedureResult};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

static GLOBAL_CHANNEL: Lazy<CepcChannel> = Lazy::new(CepcChannel::new);

/// One logical channel: the procedures this side answers plus the calls it
/// is waiting on.
///
/// A channel is owned by whichever context wires up a transport adapter.
/// The adapter forwards every inbound text to [`CepcChannel::handle`] and
/// supplies its send function to [`CepcChannel::call`]. Cloning is cheap and
/// shares both registries.
#[derive(Clone, Default)]
pub struct CepcChannel {
    pub(crate) procedures: ProcedureRegistry,
    pub(crate) pending_calls: PendingCallRegistry,
}

impl CepcChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default channel, created on first use.
    pub fn global() -> &'static CepcChannel {
        &GLOBAL_CHANNEL
    }

    pub fn procedures(&self) -> &ProcedureRegistry {
        &self.procedures
    }

    pub fn pending_calls(&self) -> &PendingCallRegistry {
        &self.pending_calls
    }

    /// Registers a procedure operating on raw JSON values.
    pub fn register_procedure<F, Fut>(
        &self,
        name: &str,
        handler: F,
    ) -> Result<(), ProcedureRegistryError>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProcedureResult> + Send + 'static,
    {
        self.procedures.register(name, handler)
    }

    /// Registers the handler of a typed procedure definition.
    ///
    /// Request data that does not decode into `P::Request` fails the call
    /// with an internal error.
    pub fn register_typed<P, F, Fut>(&self, handler: F) -> Result<(), ProcedureRegistryError>
    where
        P: CepcProcedure + 'static,
        F: Fn(P::Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<P::Response, ProcedureFailure>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.procedures.register(P::NAME, move |request_data: Value| {
            let handler = handler.clone();
            async move {
                let request = P::decode_request(request_data)?;
                let response = handler(request).await?;
                Ok::<Value, ProcedureFailure>(P::encode_response(&response)?)
            }
        })
    }

    pub fn unregister_procedure(&self, name: &str) -> bool {
        self.procedures.unregister(name)
    }

    /// Clears both registries. Pending calls are abandoned: they never
    /// settle.
    pub fn reset(&self) {
        self.procedures.reset();
        self.pending_calls.reset();
    }
}
