use super::PendingCallId;
use crate::constants::CEPC_LOG_NAME;
use crate::error::CepcError;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;

/// What a pending call settles with: response data or a typed error.
pub type CallOutcome = Result<Value, CepcError>;

struct PendingCall {
    /// Distinguishes this registration from a later one under the same id.
    slot: u64,
    on_settle: oneshot::Sender<CallOutcome>,
    timer: Option<AbortHandle>,
}

impl PendingCall {
    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[derive(Default)]
struct PendingCallTable {
    entries: Mutex<HashMap<PendingCallId, PendingCall>>,
    next_slot: AtomicU64,
}

/// Table of calls issued from this side that still await their response.
///
/// Every entry is removed exactly once: by [`settle`](Self::settle), by its
/// timeout, by its [`PendingCallCancel`], or in bulk by
/// [`reset`](Self::reset). Only `settle` and the timeout deliver an outcome;
/// cancellation and reset abandon the entry, which closes its sink without a
/// value.
///
/// Cloning shares the table.
#[derive(Clone, Default)]
pub struct PendingCallRegistry {
    table: Arc<PendingCallTable>,
}

/// Removes one pending entry without settling it.
///
/// Cancelling is idempotent: once the entry is gone (settled, timed out,
/// reset or already cancelled) it does nothing.
pub struct PendingCallCancel {
    registry: PendingCallRegistry,
    id: PendingCallId,
    slot: u64,
}

impl PendingCallCancel {
    /// Returns whether an entry was removed.
    pub fn cancel(&self) -> bool {
        let removed = {
            let mut entries = self.registry.table.entries.lock();
            match entries.get(&self.id) {
                Some(call) if call.slot == self.slot => entries.remove(&self.id),
                _ => None,
            }
        };

        match removed {
            Some(mut call) => {
                call.stop_timer();
                tracing::debug!(call = %self.id, "[{CEPC_LOG_NAME}] cancelled pending call");
                true
            }
            None => false,
        }
    }
}

impl PendingCallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a pending entry whose outcome is delivered to `on_settle`.
    ///
    /// An entry already stored under the same id is abandoned.
    pub fn register(
        &self,
        name: &str,
        key: &str,
        on_settle: oneshot::Sender<CallOutcome>,
    ) -> PendingCallCancel {
        let id = PendingCallId::new(name, key);
        let slot = self.table.next_slot.fetch_add(1, Ordering::Relaxed);

        let replaced = self.table.entries.lock().insert(
            id.clone(),
            PendingCall {
                slot,
                on_settle,
                timer: None,
            },
        );

        if let Some(mut previous) = replaced {
            previous.stop_timer();
            tracing::warn!(call = %id, "[{CEPC_LOG_NAME}] request `{id}` was already pending and has been abandoned");
        }

        PendingCallCancel {
            registry: self.clone(),
            id,
            slot,
        }
    }

    /// Arms a timer that settles the entry with a timeout error once
    /// `timeout` has elapsed.
    ///
    /// Must be called from within a Tokio runtime. Does nothing if the entry
    /// has already been removed.
    pub fn arm_timeout(&self, cancel: &PendingCallCancel, timeout: Duration) {
        let mut entries = self.table.entries.lock();

        let Some(call) = entries.get_mut(&cancel.id) else {
            return;
        };
        if call.slot != cancel.slot {
            return;
        }

        let registry = self.clone();
        let id = cancel.id.clone();
        let slot = cancel.slot;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            registry.expire(&id, slot, timeout);
        });

        call.stop_timer();
        call.timer = Some(timer.abort_handle());
    }

    /// Settles the entry for `(name, key)` with `outcome`.
    ///
    /// An absent entry is expected under races (the caller already timed
    /// out, or the response was relayed twice). It is logged and otherwise
    /// ignored. Returns whether an entry was settled.
    pub fn settle(&self, name: &str, key: &str, outcome: CallOutcome) -> bool {
        let id = PendingCallId::new(name, key);
        let removed = self.table.entries.lock().remove(&id);

        match removed {
            Some(mut call) => {
                call.stop_timer();
                tracing::debug!(call = %id, ok = outcome.is_ok(), "[{CEPC_LOG_NAME}] settled `{id}`");
                // The receiver is gone only if the caller stopped waiting.
                let _ = call.on_settle.send(outcome);
                true
            }
            None => {
                let what = if outcome.is_ok() { "response" } else { "error" };
                tracing::error!(
                    call = %id,
                    "[{CEPC_LOG_NAME}] cannot receive the {what} because request `{id}` has no callback"
                );
                false
            }
        }
    }

    pub fn contains(&self, name: &str, key: &str) -> bool {
        self.table
            .entries
            .lock()
            .contains_key(&PendingCallId::new(name, key))
    }

    pub fn len(&self) -> usize {
        self.table.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.entries.lock().is_empty()
    }

    /// Abandons every pending entry. No outcome is delivered and all timers
    /// are stopped.
    pub fn reset(&self) {
        let drained: Vec<PendingCall> = self
            .table
            .entries
            .lock()
            .drain()
            .map(|(_, call)| call)
            .collect();

        let count = drained.len();
        for mut call in drained {
            call.stop_timer();
        }

        if count > 0 {
            tracing::debug!(count, "[{CEPC_LOG_NAME}] abandoned pending calls");
        }
    }

    fn expire(&self, id: &PendingCallId, slot: u64, timeout: Duration) {
        let removed = {
            let mut entries = self.table.entries.lock();
            match entries.get(id) {
                Some(call) if call.slot == slot => entries.remove(id),
                _ => None,
            }
        };

        if let Some(call) = removed {
            tracing::debug!(
                call = %id,
                timeout_ms = timeout.as_millis() as u64,
                "[{CEPC_LOG_NAME}] request `{id}` timed out"
            );
            let _ = call.on_settle.send(Err(CepcError::timeout()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn settle_delivers_once() {
        let registry = PendingCallRegistry::new();
        let (tx, rx) = oneshot::channel();
        let _cancel = registry.register("ping", "k", tx);

        assert!(registry.settle("ping", "k", Ok(json!("pong"))));
        assert!(!registry.settle("ping", "k", Ok(json!("again"))));
        assert_eq!(rx.await.unwrap(), Ok(json!("pong")));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn cancel_is_idempotent_and_does_not_settle() {
        let registry = PendingCallRegistry::new();
        let (tx, rx) = oneshot::channel();
        let cancel = registry.register("ping", "k", tx);

        assert!(cancel.cancel());
        assert!(!cancel.cancel());
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn stale_cancel_leaves_newer_entry() {
        let registry = PendingCallRegistry::new();
        let (tx1, _rx1) = oneshot::channel();
        let stale = registry.register("ping", "k", tx1);
        let (tx2, _rx2) = oneshot::channel();
        let _fresh = registry.register("ping", "k", tx2);

        assert!(!stale.cancel());
        assert!(registry.contains("ping", "k"));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_settles_with_timeout() {
        let registry = PendingCallRegistry::new();
        let (tx, rx) = oneshot::channel();
        let cancel = registry.register("slow", "k", tx);
        registry.arm_timeout(&cancel, Duration::from_millis(100));

        let outcome = rx.await.unwrap();
        assert_eq!(outcome, Err(CepcError::timeout()));
        assert!(!registry.contains("slow", "k"));
    }

    #[tokio::test(start_paused = true)]
    async fn settle_stops_timer() {
        let registry = PendingCallRegistry::new();
        let (tx, rx) = oneshot::channel();
        let cancel = registry.register("fast", "k", tx);
        registry.arm_timeout(&cancel, Duration::from_millis(100));

        assert!(registry.settle("fast", "k", Ok(json!(1))));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.await.unwrap(), Ok(json!(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_abandons_entries_and_timers() {
        let registry = PendingCallRegistry::new();
        let (tx, rx) = oneshot::channel();
        let cancel = registry.register("slow", "k", tx);
        registry.arm_timeout(&cancel, Duration::from_millis(100));

        registry.reset();
        assert!(registry.is_empty());
        assert!(rx.await.is_err());
        assert!(!cancel.cancel());
    }
}
