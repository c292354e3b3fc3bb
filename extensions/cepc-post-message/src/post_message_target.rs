use cepc::SendError;
use thiserror::Error;

/// Something text can be posted to, synchronously.
pub trait PostMessageTarget: Send + Sync {
    fn post_message(&self, message: String) -> Result<(), SendError>;
}

/// The target a reply should be posted to is not installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("post message target is not initialized")]
pub struct TargetUnavailable;
