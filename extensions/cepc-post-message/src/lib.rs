//! Adapters for peers reachable through a synchronous `postMessage`-style
//! function, such as a WebView's host binding.

mod call_procedure;
mod guest_bridge;
mod post_message_target;

pub use call_procedure::call_procedure;
pub use guest_bridge::GuestBridge;
pub use post_message_target::{PostMessageTarget, TargetUnavailable};
