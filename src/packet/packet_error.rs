use thiserror::Error;

#[derive(Debug, Error)]
pub enum PacketEncodeError {
    #[error("failed to serialize packet body: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outcome of a failed decode.
///
/// `Foreign` is an everyday result on a shared channel, not a fault: the text
/// simply belongs to some other protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketDecodeError {
    /// The text does not start with the protocol marker.
    #[error("payload does not carry the protocol marker")]
    Foreign,

    /// The marker is present but the body is unusable.
    #[error("malformed packet: {0}")]
    Malformed(String),
}
