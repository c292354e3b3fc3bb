mod channel_sender;
mod channel_transport;

pub use channel_sender::{ChannelSender, TransportClosed};
pub use channel_transport::ChannelTransport;
