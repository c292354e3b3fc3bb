mod pending_call_id;
mod pending_call_registry;

pub use pending_call_id::PendingCallId;
pub use pending_call_registry::{CallOutcome, PendingCallCancel, PendingCallRegistry};
