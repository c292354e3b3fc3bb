use super::{ProcedureFuture, ProcedureHandler, ProcedureResult};
use crate::constants::CEPC_LOG_NAME;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, hash_map::Entry};
use std::{future::Future, sync::Arc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcedureRegistryError {
    #[error("a procedure named `{0}` is already registered")]
    DuplicateProcedure(String),
}

/// Table of procedures this side of the channel answers.
///
/// Cloning shares the table. The lock is only held while the map is
/// touched; handlers are cloned out before they run.
#[derive(Clone, Default)]
pub struct ProcedureRegistry {
    handlers: Arc<Mutex<HashMap<String, ProcedureHandler>>>,
}

impl ProcedureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`.
    ///
    /// The first registration wins: registering a taken name fails with
    /// [`ProcedureRegistryError::DuplicateProcedure`] and leaves the
    /// existing handler in place.
    pub fn register<F, Fut>(&self, name: &str, handler: F) -> Result<(), ProcedureRegistryError>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProcedureResult> + Send + 'static,
    {
        match self.handlers.lock().entry(name.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!(
                    procedure = name,
                    "[{CEPC_LOG_NAME}] procedure `{name}` is already registered"
                );
                Err(ProcedureRegistryError::DuplicateProcedure(name.to_string()))
            }
            Entry::Vacant(entry) => {
                let wrapped = move |request_data: Value| {
                    Box::pin(handler(request_data)) as ProcedureFuture
                };
                entry.insert(Arc::new(wrapped));
                tracing::debug!(procedure = name, "[{CEPC_LOG_NAME}] registered `{name}`");
                Ok(())
            }
        }
    }

    /// Removes the procedure. Returns whether it was registered.
    pub fn unregister(&self, name: &str) -> bool {
        self.handlers.lock().remove(name).is_some()
    }

    pub fn lookup(&self, name: &str) -> Option<ProcedureHandler> {
        self.handlers.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.lock().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.lock().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Drops every registration. Dispatches already running keep their
    /// handler and finish normally.
    pub fn reset(&self) {
        self.handlers.lock().clear();
    }
}
