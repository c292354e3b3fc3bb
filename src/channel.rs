mod call_options;
mod caller;
mod cepc_channel;
mod dispatcher;
mod send;

pub use call_options::CallOptions;
pub use cepc_channel::CepcChannel;
pub use send::{CepcSend, SendError, SyncSend};
