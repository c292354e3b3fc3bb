use rand::Rng;

/// Builds a correlation key for the call with the given `index`.
///
/// The index part makes the key unique within the process for as long as
/// the counter does not wrap; the random salt keeps keys from two processes
/// sharing one channel from colliding.
#[inline]
pub fn generate_call_key(index: u64) -> String {
    let salt: u32 = rand::rng().random();
    format!("{index:x}-{salt:08x}")
}
