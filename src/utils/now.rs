/// Returns the current wall-clock time in milliseconds since the UNIX epoch.
///
/// This is the resolution packets carry in their `timestamp` field, which
/// keeps them comparable with timestamps produced by JavaScript peers
/// (`Date.now()`).
///
/// # Example:
/// ```rust
/// use cepc::utils::now;
/// let timestamp = now();
/// assert!(timestamp > 0);
/// ```
#[inline]
pub fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
