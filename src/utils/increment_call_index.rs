use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide call counter which is initialized at 0.
static GLOBAL_CALL_INDEX: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(0));

/// Returns the next call index.
///
/// Indexes only order calls in diagnostics; correlation uses the call key.
#[inline]
pub fn increment_call_index() -> u64 {
    GLOBAL_CALL_INDEX.fetch_add(1, Ordering::Relaxed)
}
